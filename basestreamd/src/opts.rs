use std::path::PathBuf;

use structopt::StructOpt;

///
/// Command line options.
///
#[derive(Debug, StructOpt)]
#[structopt(name = "basestreamd", about = "Stream Base blocks and flash blocks.")]
pub struct Opts {
    /// Debug mode
    #[structopt(short, long)]
    pub debug: bool,

    /// Wether to print nice little things like the banner and a goodbye
    #[structopt(short, long)]
    pub no_frills: bool,

    /// YAML config file, the environment is used when omitted
    #[structopt(short, long, parse(from_os_str))]
    pub config: Option<PathBuf>,

    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Stream finalized blocks over gRPC
    Blocks,

    /// Stream flash blocks over gRPC
    FlashBlocks,

    /// Stream flash blocks over WebSocket
    WsFlashBlocks,

    /// Send a signed raw transaction
    SendTx {
        /// Hex encoded signed transaction
        raw_tx: String,
    },
}
