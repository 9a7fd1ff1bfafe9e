//! Line responder
//!
//! Reads a byte stream line by line through a [`LineBuffer`] and answers each
//! completed line with its extracted fields.

use anyhow::{Context, Result};
use tokio::fs::File;
use tokio::io::{stdin, stdout, AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::config::Config;
use crate::fields::FieldReport;
use crate::parser::LineBuffer;
use crate::stream::{LinePump, PumpStats};

/// Greeting sent before input is read when the handshake is enabled
pub const READY: &[u8] = b"READY\r\n";

/// Initialise `env_logger`, with `RUST_LOG` taking precedence over `level`
pub fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed (tests, embedding)
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Run against the configured input file or stdin, answering on stdout
pub async fn run(config: Config) -> Result<()> {
    let output = stdout();
    let stats = match &config.input {
        Some(path) => {
            let file = File::open(path)
                .await
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            log::info!("Reading lines from {}", path.display());
            run_with(&config, file, output).await?
        }
        None => {
            log::info!("Reading lines from stdin");
            run_with(&config, stdin(), output).await?
        }
    };

    log::info!(
        "Processed {} lines ({} truncated, {} bytes dropped)",
        stats.lines,
        stats.truncated_lines,
        stats.dropped_bytes
    );
    Ok(())
}

/// Pump `input` through a line buffer of the configured capacity and write
/// one response per completed line to `output`
pub async fn run_with<R, W>(config: &Config, input: R, mut output: W) -> Result<PumpStats>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let line_ending: &[u8] = if config.handshake { b"\r\n" } else { b"\n" };

    if config.handshake {
        output.write_all(READY).await.context("Failed to write handshake")?;
        output.flush().await?;
    }

    let mut storage = vec![0u8; config.capacity];
    let mut pump = LinePump::new(input, LineBuffer::new(&mut storage));
    log::debug!("Line buffer capacity: {} bytes", config.capacity);

    while let Some(info) = pump.next_line().await? {
        if info.truncated {
            log::warn!(
                "Line {} truncated: {} bytes received, {} kept",
                info.number,
                info.received,
                pump.buffer().line().len()
            );
        }

        let report = FieldReport::extract(pump.buffer(), &config.letters, &info);
        let response = report.render(config.format)?;
        log::debug!("Line {}: {}", info.number, response);

        output
            .write_all(response.as_bytes())
            .await
            .context("Failed to write response")?;
        output.write_all(line_ending).await?;
        output.flush().await?;
    }

    Ok(pump.stats())
}
