//!
//! The `basestreamd` daemon.
//!

use std::process::exit;

use basestream::{
    consumers::{LogSink, StreamConsumer, Termination},
    errors::{eyre, Report},
    grpc::{self, GrpcAdapter},
    logging::{self, info, warn},
    submitter::TransactionSubmitter,
    tokio,
    transport::Transport,
    ws::WebSocketAdapter,
};

mod cli;
mod opts;

///
/// Start the `basestreamd` daemon.
///
#[tokio::main]
async fn main() -> Result<(), Report> {
    // Get the CLI options, handle argument errors nicely
    let opts = match cli::get_opts() {
        Ok(opts) => opts,
        Err(e) => {
            println!("{}", e);
            exit(1);
        }
    };

    // Setup tracing and error reporting
    logging::setup(opts.debug)?;

    // If there ain't no no-frills...
    if !opts.no_frills {
        cli::print_banner();
    }

    let config = cli::load_config(&opts)?;
    info!("Starting basestreamd...");

    match opts.cmd {
        opts::Command::Blocks => run_stream(GrpcAdapter::blocks(&config)).await?,
        opts::Command::FlashBlocks => run_stream(GrpcAdapter::flash_blocks(&config)).await?,
        opts::Command::WsFlashBlocks => run_stream(WebSocketAdapter::new(&config)).await?,
        opts::Command::SendTx { raw_tx } => {
            let channel =
                grpc::connect_channel(&config.grpc_url, config.block_connect_timeout()).await?;
            let tx_hash = TransactionSubmitter::new(channel, &config)
                .submit(&raw_tx)
                .await?;
            println!("{}", tx_hash);
        }
    }

    // Say goodbye if no no-frills
    if !opts.no_frills {
        println!("\nbasestreamd says: Goodbye\n");
    }

    Ok(())
}

///
/// Consume one feed until it ends or Ctrl-C is pressed.
///
async fn run_stream<T: Transport>(transport: T) -> Result<(), Report> {
    let mut consumer = StreamConsumer::new(transport, LogSink);

    tokio::select! {
        report = consumer.run() => {
            let report = report?;
            info!(
                "Stream finished: {} records, {} skipped",
                report.records, report.skipped
            );
            if let Termination::Transport(reason) = report.termination {
                return Err(eyre!("Stream failed: {}", reason));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, shutting down");
        }
    }

    Ok(())
}
