use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "linkscope")]
#[command(author, version, about)]
#[command(long_about = "An interactive explorer of department collaboration data.\n\n\
    Point it at a directory with departments.csv, research.csv and\n\
    teaching.csv and explore the links as a chord diagram or an\n\
    adjacency matrix.\n\n\
    Examples:\n  \
    linkscope data/                 Launch the explorer (fullscreen)\n  \
    linkscope data/ --windowed      Launch in a window\n  \
    linkscope data/ --viz matrix    Start on the matrix view\n  \
    linkscope data/ --no-autoplay   Disable the order slideshow")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Directory containing departments.csv, research.csv and teaching.csv
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Visualization to start on (chord or matrix)
    #[arg(long, global = false)]
    pub viz: Option<String>,

    /// Sort order to start on (department, links, emphasis or faculty)
    #[arg(long, global = false)]
    pub order: Option<String>,

    /// Do not cycle through sort orders automatically
    #[arg(long, global = false)]
    pub no_autoplay: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.viz, defaults.order)
        key: String,

        /// Value to set
        value: String,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        if self.no_color {
            colored::control::set_override(false);
        }

        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                crate::commands::version::run();
                Ok(())
            }
            None => {
                if let Some(data_dir) = self.data_dir {
                    if !data_dir.is_dir() {
                        anyhow::bail!("Not a directory: {}", data_dir.display());
                    }
                    let launch = crate::app::Launch {
                        data_dir,
                        windowed: self.windowed,
                        viz: self.viz,
                        order: self.order,
                        no_autoplay: self.no_autoplay,
                        verbose: self.verbose,
                        quiet: self.quiet,
                    };
                    crate::app::run(launch)
                } else {
                    use clap::CommandFactory;
                    let mut cmd = Self::command();
                    cmd.print_help()?;
                    println!();
                    Ok(())
                }
            }
        }
    }
}
