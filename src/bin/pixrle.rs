use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pixrle", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a JSON tree description into wire bytes.
    Encode(EncodeArgs),
    /// Decode wire bytes into a JSON tree description.
    Decode(DecodeArgs),
    /// Decode wire bytes, flatten them and write a grayscale PNG.
    Render(RenderArgs),
    /// Evaluate the horizontal wipe template at one context value.
    Wipe(WipeArgs),
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Input tree JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output document path.
    #[arg(long)]
    out: PathBuf,

    /// Deepest repeat nesting accepted.
    #[arg(long, default_value_t = pixrle::DecodeOpts::default().max_depth)]
    max_depth: usize,
}

#[derive(Parser, Debug)]
struct DecodeArgs {
    /// Input document(s).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Deepest repeat nesting accepted.
    #[arg(long, default_value_t = pixrle::DecodeOpts::default().max_depth)]
    max_depth: usize,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input document.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Row width of the output raster in pixels.
    #[arg(long)]
    width: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Refuse to materialize more pixels than this.
    #[arg(long, default_value_t = pixrle::FlattenOpts::default().max_pixels)]
    max_pixels: u64,

    /// Deepest repeat nesting accepted.
    #[arg(long, default_value_t = pixrle::DecodeOpts::default().max_depth)]
    max_depth: usize,
}

#[derive(Parser, Debug)]
struct WipeArgs {
    /// Raster width in pixels.
    #[arg(long)]
    width: u16,

    /// Raster height in pixels.
    #[arg(long)]
    height: u16,

    /// Context value: number of white pixels per row.
    #[arg(long, allow_hyphen_values = true)]
    t: i64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the evaluated tree as a wire document.
    #[arg(long)]
    bin: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Encode(args) => cmd_encode(args),
        Command::Decode(args) => cmd_decode(args),
        Command::Render(args) => cmd_render(args),
        Command::Wipe(args) => cmd_wipe(args),
    }
}

fn read_tree_json(path: &Path, opts: &pixrle::DecodeOpts) -> anyhow::Result<pixrle::Node> {
    let bytes = std::fs::read(path).with_context(|| format!("open tree '{}'", path.display()))?;
    let node = pixrle::tree_from_json_with(&bytes, opts)
        .with_context(|| format!("parse tree '{}'", path.display()))?;
    Ok(node)
}

fn read_bytes(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read document '{}'", path.display()))
}

fn write_bytes(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let opts = pixrle::DecodeOpts {
        max_depth: args.max_depth,
    };
    let node = read_tree_json(&args.in_path, &opts)?;
    let bytes = node.encode()?;
    write_bytes(&args.out, &bytes)?;
    eprintln!("wrote {} ({} bytes)", args.out.display(), bytes.len());
    Ok(())
}

fn cmd_decode(args: DecodeArgs) -> anyhow::Result<()> {
    let bytes = read_bytes(&args.in_path)?;
    let opts = pixrle::DecodeOpts {
        max_depth: args.max_depth,
    };
    let docs = pixrle::decode_all_with(&bytes, &opts)?;

    // A single document prints as one tree, several as a JSON array.
    let json = match docs.as_slice() {
        [one] => serde_json::to_string_pretty(one)?,
        many => serde_json::to_string_pretty(many)?,
    };

    match args.out {
        Some(out) => {
            write_bytes(&out, json.as_bytes())?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let bytes = read_bytes(&args.in_path)?;
    let opts = pixrle::DecodeOpts {
        max_depth: args.max_depth,
    };
    let (node, rest) = pixrle::decode_with(&bytes, &opts)?;
    if !rest.is_empty() {
        eprintln!("ignoring {} trailing bytes", rest.len());
    }

    let pixels = node.flatten_with(&pixrle::FlattenOpts {
        max_pixels: args.max_pixels,
    })?;
    pixrle::save_png(&pixels, args.width, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_wipe(args: WipeArgs) -> anyhow::Result<()> {
    let template = pixrle::horizontal_wipe(args.width, args.height);
    let node = template
        .evaluate(args.t)
        .with_context(|| format!("evaluate wipe at t={}", args.t))?;

    if let Some(bin) = &args.bin {
        write_bytes(bin, &node.encode()?)?;
        eprintln!("wrote {}", bin.display());
    }

    let pixels = node.flatten_with(&pixrle::FlattenOpts::default())?;
    pixrle::save_png(&pixels, u32::from(args.width), &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
