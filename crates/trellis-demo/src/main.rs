//! Lay out a scene and print the resulting tree.

use std::{fs, io, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use tracing::Level;
use trellis::{
    Tree,
    controls::{Panel, menu},
    dump::dump,
    geom::{Point, Size},
    scene::Scene,
};

/// The scene used when none is given.
const MENU_SCENE: &str = include_str!("../scenes/menu.json");

/// CLI flags for the layout demo.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Scene file in JSON. Defaults to the built-in menu scene.
    scene: Option<PathBuf>,

    /// Screen width in cells.
    #[clap(short = 'W', long, default_value_t = 80)]
    width: u32,

    /// Screen height in cells.
    #[clap(short = 'H', long, default_value_t = 24)]
    height: u32,

    /// Open the submenu of the named menu item. Repeat to open a chain.
    #[clap(short, long)]
    open: Vec<String>,

    /// Report the node under a point, given as X,Y.
    #[clap(short, long, value_parser = parse_point)]
    locate: Option<Point>,

    /// Increase log verbosity.
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Parse an `X,Y` pair.
fn parse_point(s: &str) -> Result<Point> {
    let (x, y) = s
        .split_once(',')
        .with_context(|| format!("expected X,Y, got {s:?}"))?;
    Ok(Point::new(x.trim().parse()?, y.trim().parse()?))
}

/// Run the layout demo.
pub fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let json = match &args.scene {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => MENU_SCENE.to_string(),
    };
    let scene = Scene::from_json(&json)?;

    let mut tree = Tree::new(Panel);
    let root = tree.root_id();
    scene.build(&mut tree, root)?;

    let screen = Size::new(args.width, args.height);
    tree.layout(screen)?;

    for name in &args.open {
        let Some(item) = tree.find(name) else {
            bail!("no node named {name:?}");
        };
        let popup = menu::open(&mut tree, item)?;
        tracing::info!(item = %name, ?popup, "opened submenu");
    }
    if tree.layout(screen)? {
        tracing::info!(open = tree.open_popups().len(), "relayout");
    }

    println!("{}", dump(&tree, root)?);

    if let Some(point) = args.locate {
        match tree.locate(point) {
            Some(id) => {
                let name = tree.node(id).map(|n| n.name().to_string()).unwrap_or_default();
                let bounds = tree.screen_bounds(id);
                println!("{point:?}: {name} {bounds:?}");
            }
            None => println!("{point:?}: off screen"),
        }
    }
    Ok(())
}
