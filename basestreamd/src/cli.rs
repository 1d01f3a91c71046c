//!
//! `basestreamd` CLI functionality
//!

use basestream::{config::Config, errors::Report};
use structopt::StructOpt;

use crate::opts::Opts;

const BANNER_STR: &str = include_str!("../banner.txt");

///
/// Print the banner for fun.
///
pub fn print_banner() {
    println!("{}", BANNER_STR);
}

///
/// Get the command line options.
///
pub fn get_opts() -> Result<Opts, Report> {
    Ok(Opts::from_args_safe()?)
}

///
/// Load the config from `--config` if given, the environment otherwise.
///
pub fn load_config(opts: &Opts) -> Result<Config, Report> {
    let config = match &opts.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    Ok(config)
}
