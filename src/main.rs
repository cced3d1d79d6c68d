use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use quadforest::{
    complete_region, CompletionConfig, Coord, Level, NoData, Quadrant, Tree, TreeIndex,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quadforest", about = "Morton-order quadtree/octree algebra")]
struct Cli {
    /// Log debug output (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fill the Morton-order gap between two quadrants with a minimal tree.
    Complete {
        /// Spatial dimension (2 for quadtrees, 3 for octrees).
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=3))]
        dim: u8,
        /// First endpoint: `x,y[,z],level` (hex with 0x) or `level:index`.
        first: String,
        /// Last endpoint, same forms as the first.
        last: String,
        /// Leave the first endpoint out of the output.
        #[arg(long)]
        exclude_first: bool,
        /// Leave the last endpoint out of the output.
        #[arg(long)]
        exclude_last: bool,
        /// Tree index passed to the data hooks and printed as line prefix.
        #[arg(long, default_value_t = 0)]
        tree: TreeIndex,
        /// Print a blake3 checksum of the result.
        #[arg(long)]
        checksum: bool,
    },
    /// Show the quadrant at a linear index of the uniform grid.
    Locate {
        /// Spatial dimension (2 for quadtrees, 3 for octrees).
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=3))]
        dim: u8,
        /// Level of the uniform grid.
        level: Level,
        /// Linear index into that grid.
        index: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Complete {
            dim,
            first,
            last,
            exclude_first,
            exclude_last,
            tree,
            checksum,
        } => {
            let config = CompletionConfig::new()
                .with_include_first(!exclude_first)
                .with_include_last(!exclude_last);
            match dim {
                2 => run_complete::<2>(&first, &last, &config, tree, checksum)?,
                _ => run_complete::<3>(&first, &last, &config, tree, checksum)?,
            }
        }
        Commands::Locate { dim, level, index } => match dim {
            2 => run_locate::<2>(level, index)?,
            _ => run_locate::<3>(level, index)?,
        },
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_complete<const D: usize>(
    first: &str,
    last: &str,
    config: &CompletionConfig,
    which_tree: TreeIndex,
    checksum: bool,
) -> Result<()> {
    let q1 = parse_quadrant::<D>(first).context("invalid first endpoint")?;
    let q2 = parse_quadrant::<D>(last).context("invalid last endpoint")?;

    let mut tree: Tree<D> = Tree::new(which_tree);
    complete_region(&q1, &q2, config, &mut tree, &mut NoData)
        .with_context(|| format!("cannot complete region between {} and {}", q1, q2))?;

    print!("{}", tree.display(Some(which_tree as i32)));
    println!(
        "quadrants={}\tmaxlevel={}\tsorted={}\tcomplete={}",
        tree.len(),
        tree.maxlevel(),
        tree.is_sorted(),
        tree.is_complete()
    );
    if checksum {
        println!("checksum={}", tree.checksum().to_hex());
    }
    Ok(())
}

fn run_locate<const D: usize>(level: Level, index: u64) -> Result<()> {
    let q = Quadrant::<D>::from_linear_index(level, index)
        .with_context(|| format!("cannot locate index {} at level {}", index, level))?;

    println!("quadrant\t{}", q);
    println!("valid\t{}", q.is_valid());
    println!("child_id\t{}", q.child_id());
    match q.checked_parent() {
        Some(parent) => println!("parent\t{}", parent),
        None => println!("parent\t-"),
    }
    println!("morton_key\t{:#x}", q.morton_key());
    Ok(())
}

/// Parse `x,y[,z],level` or `level:index`.
fn parse_quadrant<const D: usize>(text: &str) -> Result<Quadrant<D>> {
    if let Some((level, index)) = text.split_once(':') {
        let level: Level = level.trim().parse().context("invalid level")?;
        let index = parse_int(index)?;
        let index = u64::try_from(index).context("negative linear index")?;
        return Ok(Quadrant::from_linear_index(level, index)?);
    }

    let fields = text
        .split(',')
        .map(parse_int)
        .collect::<Result<Vec<i64>>>()?;
    if fields.len() != D + 1 {
        bail!(
            "expected {} comma-separated values (coordinates and level), got {}",
            D + 1,
            fields.len()
        );
    }

    let mut coords = [0; D];
    for (coord, &value) in coords.iter_mut().zip(&fields) {
        *coord = Coord::try_from(value)
            .with_context(|| format!("coordinate {} out of range", value))?;
    }
    let level = Level::try_from(fields[D]).context("level out of range")?;
    Ok(Quadrant::new(coords, level)?)
}

fn parse_int(text: &str) -> Result<i64> {
    let text = text.trim();
    let value = match text.strip_prefix("0x") {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => text.parse(),
    };
    value.with_context(|| format!("invalid integer '{}'", text))
}
