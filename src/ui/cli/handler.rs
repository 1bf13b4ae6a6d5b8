// Wed Jan 15 2026 - Alex

use super::args::{Args, ChainArgs, Command, DemoArgs, ResolveArgs, TreeArgs};
use crate::config::ResolverConfig;
use crate::hierarchy::{
    load_definition, sample, ClassHierarchy, HierarchyDefinition, HierarchyStats, Instance, OwnerReport,
    OwnerResolver,
};
use crate::utils::logging::{init_logger, level_from_str, scoped_timer};
use anyhow::Context;
use colored::Colorize;

pub struct CommandHandler {
    json_output: bool,
    quiet: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self {
            json_output: false,
            quiet: false,
        }
    }

    pub fn execute(mut self, args: Args) -> anyhow::Result<()> {
        self.setup_logging(&args);
        if args.no_color {
            colored::control::set_override(false);
        }
        self.json_output = args.json_output;
        self.quiet = args.quiet;

        let config = Self::build_config(&args)?;

        match args.command {
            Command::Resolve(resolve_args) => self.handle_resolve(resolve_args, &config),
            Command::Chain(chain_args) => self.handle_chain(chain_args, &config),
            Command::Tree(tree_args) => self.handle_tree(tree_args),
            Command::Demo(demo_args) => self.handle_demo(demo_args, &config),
        }
    }

    fn setup_logging(&self, args: &Args) {
        let level = if args.quiet {
            log::LevelFilter::Error
        } else {
            level_from_str(&args.log_level)
        };
        init_logger(level);
    }

    fn build_config(args: &Args) -> anyhow::Result<ResolverConfig> {
        let mut config = match &args.config {
            Some(path) => ResolverConfig::from_file(path)?,
            None => ResolverConfig::default(),
        };
        if let Some(max_depth) = args.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(label) = &args.root_label {
            config.root_label = label.clone();
        }
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    fn handle_resolve(&self, args: ResolveArgs, config: &ResolverConfig) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let definition = load_definition(&args.definition)?;
        let (hierarchy, instance) = load_instance(&definition, &args.instance)?;
        let report = resolve_report(&hierarchy, &instance, &args.members, config)?;

        self.print_report(&report)
    }

    fn handle_chain(&self, args: ChainArgs, config: &ResolverConfig) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let definition = load_definition(&args.definition)?;
        let (hierarchy, instance) = load_instance(&definition, &args.instance)?;
        let resolver = OwnerResolver::from_config(&hierarchy, config);
        let chain = resolver.linearizer().linearize(&instance)?;

        if self.json_output {
            println!("{}", serde_json::to_string_pretty(&chain.names())?);
        } else {
            println!("{}", chain.to_string().cyan());
        }
        Ok(())
    }

    fn handle_tree(&self, args: TreeArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let definition = load_definition(&args.definition)?;
        let hierarchy = definition.build()?;

        print!("{}", hierarchy);
        if args.stats {
            println!();
            print!("{}", HierarchyStats::from_hierarchy(&hierarchy));
        }
        Ok(())
    }

    fn handle_demo(&self, args: DemoArgs, config: &ResolverConfig) -> anyhow::Result<()> {
        let hierarchy = sample::human_hierarchy()?;
        let john = sample::john(&hierarchy)?;

        let members: Vec<String> = if args.members.is_empty() {
            sample::DEMO_MEMBERS.iter().map(|m| m.to_string()).collect()
        } else {
            args.members
        };

        if !self.quiet && !self.json_output {
            println!("{}", john.to_string().dimmed());
            println!("{}", "----".dimmed());
        }

        let report = resolve_report(&hierarchy, &john, &members, config)?;
        self.print_report(&report)
    }

    fn print_report(&self, report: &OwnerReport) -> anyhow::Result<()> {
        if self.json_output {
            println!("{}", serde_json::to_string_pretty(&report.to_json())?);
            return Ok(());
        }

        for (member, owner) in &report.entries {
            let label = match owner {
                Some(owner) if owner.is_root_object() => owner.label(&report.root_label).yellow(),
                Some(owner) => owner.label(&report.root_label).green(),
                None => "null".red(),
            };
            println!("Owner of {}: {}", member.cyan(), label);
        }
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_instance(definition: &HierarchyDefinition, key: &str) -> anyhow::Result<(ClassHierarchy, Instance)> {
    let hierarchy = definition.build().context("Invalid class hierarchy")?;
    let instance = definition
        .instantiate(&hierarchy, key)
        .with_context(|| format!("Cannot construct instance {}", key))?;
    Ok((hierarchy, instance))
}

pub fn resolve_report(
    hierarchy: &ClassHierarchy,
    instance: &Instance,
    members: &[String],
    config: &ResolverConfig,
) -> anyhow::Result<OwnerReport> {
    let _timer = scoped_timer("resolve");
    let resolver = OwnerResolver::from_config(hierarchy, config);
    let report = resolver.resolve_all(Some(instance), members)?;
    log::info!("Resolved {} members of {}", report.len(), instance);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::Owner;

    const DEFINITION: &str = r#"{
        "classes": [
            { "name": "Shape", "members": ["area", "describe"] },
            { "name": "Rect", "parent": "Shape", "members": ["area"], "constructor": ["w", "h"] },
            { "name": "Square", "parent": "Rect", "constructor": ["side"] }
        ],
        "instances": [ { "name": "sq", "class": "Square", "fields": { "w": 2, "h": 2, "side": 2 } } ]
    }"#;

    #[test]
    fn test_resolve_report_from_definition() {
        let definition = HierarchyDefinition::from_json(DEFINITION).unwrap();
        let (hierarchy, instance) = load_instance(&definition, "sq").unwrap();
        let members = vec!["w".to_string(), "area".to_string(), "describe".to_string(), "clone".to_string()];

        let report = resolve_report(&hierarchy, &instance, &members, &ResolverConfig::default()).unwrap();

        assert_eq!(report.owner_of("w"), Some(&Owner::Class("Square".to_string())));
        assert_eq!(report.owner_of("area"), Some(&Owner::Class("Rect".to_string())));
        assert_eq!(report.owner_of("describe"), Some(&Owner::Class("Shape".to_string())));
        assert_eq!(report.owner_of("clone"), Some(&Owner::RootObject));
    }

    #[test]
    fn test_load_instance_unknown_key() {
        let definition = HierarchyDefinition::from_json(DEFINITION).unwrap();
        let err = load_instance(&definition, "circle").unwrap_err();
        assert!(err.to_string().contains("Cannot construct instance circle"));
    }

    #[test]
    fn test_build_config_flag_overrides() {
        let args = <Args as clap::Parser>::try_parse_from(["property-owner", "--max-depth", "5", "demo"]).unwrap();
        let config = CommandHandler::build_config(&args).unwrap();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.root_label, "Object");

        let args = <Args as clap::Parser>::try_parse_from(["property-owner", "--max-depth", "0", "demo"]).unwrap();
        assert!(CommandHandler::build_config(&args).is_err());
    }
}
