// Wed Jan 15 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "property-owner")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Find which class of an inheritance chain defines a member", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,

    #[arg(long, global = true)]
    pub json_output: bool,

    /// JSON resolver settings; flags below override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    #[arg(long, global = true)]
    pub root_label: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report the owner of each member
    Resolve(ResolveArgs),
    /// Print the linearized class chain of an instance
    Chain(ChainArgs),
    /// Print the class tree of a definition file
    Tree(TreeArgs),
    /// Run the built-in Human/Man/Student scenario
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
pub struct ResolveArgs {
    #[arg(short, long)]
    pub definition: PathBuf,

    /// Instance name, or its index in the definition file
    #[arg(short, long, default_value = "0")]
    pub instance: String,

    #[arg(required = true)]
    pub members: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct ChainArgs {
    #[arg(short, long)]
    pub definition: PathBuf,

    #[arg(short, long, default_value = "0")]
    pub instance: String,
}

#[derive(Parser, Debug)]
pub struct TreeArgs {
    #[arg(short, long)]
    pub definition: PathBuf,

    #[arg(long)]
    pub stats: bool,
}

#[derive(Parser, Debug)]
pub struct DemoArgs {
    /// Members to resolve instead of the default set
    pub members: Vec<String>,
}

impl ResolveArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.definition.exists() {
            return Err(format!("Definition file does not exist: {:?}", self.definition));
        }
        if self.members.iter().any(|m| m.trim().is_empty()) {
            return Err("Member names must not be empty".to_string());
        }
        Ok(())
    }
}

impl ChainArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.definition.exists() {
            return Err(format!("Definition file does not exist: {:?}", self.definition));
        }
        Ok(())
    }
}

impl TreeArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.definition.exists() {
            return Err(format!("Definition file does not exist: {:?}", self.definition));
        }
        Ok(())
    }
}
