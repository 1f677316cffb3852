use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{
    load_settings, FormController, HttpStickerApi, ResetControlRelease, StickerApi,
};
use shared::domain::{LookupKind, StickerId};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sticker", about = "Compose and manage greeting stickers")]
struct Args {
    /// Overrides the configured server url.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the selectable values offered by the server.
    Options {
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
    Create {
        #[arg(long, default_value = "")]
        to: String,
        #[arg(long, default_value = "")]
        from: String,
        #[arg(long, default_value = "")]
        message: String,
        #[arg(long, default_value = "")]
        message_type: String,
        #[arg(long, default_value = "")]
        font_size: String,
        #[arg(long, default_value = "")]
        text_color: String,
        /// Re-render an existing sticker instead of creating a new one.
        #[arg(long)]
        id: Option<String>,
        /// Download the rendered image to this path.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    Delete {
        #[arg(long)]
        id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    MessageType,
    FontSize,
    TextColor,
}

impl From<KindArg> for LookupKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::MessageType => LookupKind::MessageType,
            KindArg::FontSize => LookupKind::FontSize,
            KindArg::TextColor => LookupKind::TextColor,
        }
    }
}

fn ensure_no_error(controller: &FormController) -> Result<()> {
    let flags = &controller.state().flags;
    if flags.error_visible {
        return Err(anyhow!("{}", flags.error_message));
    }
    Ok(())
}

async fn print_options(
    controller: &mut FormController,
    api: &HttpStickerApi,
    kind: Option<KindArg>,
) -> Result<()> {
    let kinds = match kind {
        Some(kind) => vec![LookupKind::from(kind)],
        None => LookupKind::ALL.to_vec(),
    };
    if kinds.len() == 1 {
        controller.load_options(api, kinds[0]).await;
    } else {
        controller.initialize(api).await;
    }
    ensure_no_error(controller)?;

    for kind in kinds {
        debug!(kind = %kind, count = controller.state().options(kind).len(), "listing options");
        println!("{kind}: {}", controller.state().options(kind).join(", "));
    }
    Ok(())
}

async fn write_image(path: &Path, bytes: &[u8]) -> Result<()> {
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "saved sticker image");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings().context("failed to load settings")?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();

    let api = HttpStickerApi::from_settings(&settings)
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;
    let release = if settings.legacy_reset_controls {
        ResetControlRelease::Legacy
    } else {
        ResetControlRelease::OnCompletion
    };
    let mut controller = FormController::with_reset_release(release);

    match args.command {
        Command::Options { kind } => print_options(&mut controller, &api, kind).await?,
        Command::Create {
            to,
            from,
            message,
            message_type,
            font_size,
            text_color,
            id,
            output,
        } => {
            {
                let state = controller.state_mut();
                state.recipient = to;
                state.sender = from;
                state.message = message;
                state.message_type = message_type;
                state.font_size = font_size;
                state.text_color = text_color;
                state.sticker.id = StickerId::new(id.unwrap_or_default());
            }
            controller.submit_create(&api).await;
            ensure_no_error(&controller)?;

            let sticker = &controller.state().sticker;
            println!("Created sticker id={}", sticker.id);
            println!("Image: {}", sticker.image_source_path);
            if let Some(url) = sticker.share_url(api.base_url()) {
                println!("Share: {url}");
            }

            if let Some(path) = output {
                let bytes = api
                    .fetch_image(&sticker.image_source_path)
                    .await
                    .context("failed to download sticker image")?;
                write_image(&path, &bytes).await?;
                println!("Saved image to {}", path.display());
            }
        }
        Command::Delete { id } => {
            controller.state_mut().sticker.id = StickerId::new(id);
            controller.submit_reset(&api).await;
            ensure_no_error(&controller)?;
            println!("Sticker deleted");
        }
    }

    Ok(())
}
