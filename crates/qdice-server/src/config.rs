//! Command-line and environment configuration.

use std::net::SocketAddr;

use clap::{ArgAction, Parser, ValueEnum};
use qdice_hal::GateSet;

/// Gate set the simulator backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GateSetChoice {
    /// Every gate in the IR; compilation leaves circuits unchanged.
    #[default]
    Universal,
    /// `rz`, `sx`, `sxdg`, `x`; every circuit is translated.
    Native,
}

impl GateSetChoice {
    /// The backend gate set for this choice.
    pub fn gate_set(self) -> GateSet {
        match self {
            GateSetChoice::Universal => GateSet::universal(),
            GateSetChoice::Native => GateSet::native(),
        }
    }
}

/// qdice measurement server
#[derive(Debug, Parser)]
#[command(name = "qdice-server")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "QDICE_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Gate set of the simulated backend
    #[arg(long, env = "QDICE_GATE_SET", value_enum, default_value_t = GateSetChoice::Universal)]
    pub gate_set: GateSetChoice,

    /// Compiler optimization level (0-3)
    #[arg(
        long,
        env = "QDICE_OPT_LEVEL",
        default_value_t = 1,
        value_parser = clap::value_parser!(u8).range(0..=3)
    )]
    pub optimization_level: u8,

    /// Answer invalid input with 400 instead of 500
    #[arg(long, env = "QDICE_SPLIT_ERROR_STATUS")]
    pub split_error_status: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "qdice_server=info,qdice_engine=info,tower_http=info",
            1 => "qdice_server=debug,qdice_engine=debug,qdice_compile=debug,tower_http=debug",
            _ => "qdice_server=trace,qdice_engine=trace,qdice_compile=trace,qdice_hal=trace,qdice_adapter_sim=trace,tower_http=trace",
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the server to.
    pub bind_address: SocketAddr,
    /// Gate set of the simulated backend.
    pub gate_set: GateSetChoice,
    /// Compiler optimization level.
    pub optimization_level: u8,
    /// Map input errors to 400 instead of 500.
    pub split_error_status: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: ([127, 0, 0, 1], 5000).into(),
            gate_set: GateSetChoice::Universal,
            optimization_level: 1,
            split_error_status: false,
        }
    }
}

impl From<&Cli> for ServerConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            bind_address: cli.bind,
            gate_set: cli.gate_set,
            optimization_level: cli.optimization_level,
            split_error_status: cli.split_error_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_server_config() {
        let cli = Cli::try_parse_from(["qdice-server"]).unwrap();
        let config = ServerConfig::from(&cli);
        let default = ServerConfig::default();

        assert_eq!(config.bind_address, default.bind_address);
        assert_eq!(config.gate_set, default.gate_set);
        assert_eq!(config.optimization_level, default.optimization_level);
        assert_eq!(config.split_error_status, default.split_error_status);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "qdice-server",
            "--bind",
            "0.0.0.0:8080",
            "--gate-set",
            "native",
            "--optimization-level",
            "3",
            "--split-error-status",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.bind.port(), 8080);
        assert_eq!(cli.gate_set, GateSetChoice::Native);
        assert_eq!(cli.optimization_level, 3);
        assert!(cli.split_error_status);
        assert_eq!(cli.verbose, 2);
        assert!(cli.log_filter().contains("trace"));
    }

    #[test]
    fn test_rejects_bad_optimization_level() {
        assert!(Cli::try_parse_from(["qdice-server", "--optimization-level", "4"]).is_err());
    }

    #[test]
    fn test_gate_set_choice() {
        assert!(GateSetChoice::Native.gate_set().contains("sx"));
        assert!(!GateSetChoice::Native.gate_set().contains("h"));
        assert!(GateSetChoice::Universal.gate_set().contains("h"));
    }
}
