use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use pixwire::{Canvas, ExitStatus, PixmapCanvas, PixwireResult, Rgb8};

/// Interpret a pixwire command stream and render it to PNG output.
#[derive(Parser, Debug)]
#[command(name = "pixwire", version)]
struct Cli {
    /// Input command stream (defaults to stdin).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Output PNG for the last presented frame.
    #[arg(long, default_value = "out.png")]
    out: PathBuf,

    /// Also write every presented frame as frame-NNNN.png into this directory.
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    /// Surface width in pixels.
    #[arg(long, default_value_t = pixwire::DEFAULT_WIDTH)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = pixwire::DEFAULT_HEIGHT)]
    height: u32,
}

/// Pixmap canvas that additionally writes a numbered PNG on every present.
struct PngCanvas {
    inner: PixmapCanvas,
    frames_dir: Option<PathBuf>,
}

impl Canvas for PngCanvas {
    fn draw_point(&mut self, x: u16, y: u16, color: Rgb8) {
        self.inner.draw_point(x, y, color);
    }

    fn draw_line(&mut self, x1: u16, y1: u16, x2: u16, y2: u16, color: Rgb8) {
        self.inner.draw_line(x1, y1, x2, y2, color);
    }

    fn draw_rect_outline(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb8) {
        self.inner.draw_rect_outline(x, y, w, h, color);
    }

    fn draw_rect_filled(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb8) {
        self.inner.draw_rect_filled(x, y, w, h, color);
    }

    fn present(&mut self) -> PixwireResult<()> {
        self.inner.present()?;
        if let Some(dir) = &self.frames_dir {
            let path = dir.join(format!("frame-{:04}.png", self.inner.frames_presented()));
            write_png(&self.inner, &path)?;
        }
        Ok(())
    }
}

fn write_png(canvas: &PixmapCanvas, path: &Path) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        canvas.front().as_raw(),
        canvas.width(),
        canvas.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    if let Some(dir) = &cli.frames_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create frames dir '{}'", dir.display()))?;
    }

    let input: Box<dyn Read> = match &cli.in_path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("open '{}'", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mut canvas = PngCanvas {
        inner: PixmapCanvas::new(cli.width, cli.height)?,
        frames_dir: cli.frames_dir.clone(),
    };

    tracing::info!(width = cli.width, height = cli.height, "session start");
    let ExitStatus::Clean = pixwire::run(input, &mut canvas)?;
    tracing::info!(
        frames = canvas.inner.frames_presented(),
        "session ended cleanly"
    );

    // The final frame reflects the last present; with none, it is the cleared
    // surface.
    if let Some(parent) = cli.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    write_png(&canvas.inner, &cli.out)?;

    eprintln!("wrote {}", cli.out.display());
    Ok(())
}
