use {
    alloy::primitives::{Address, address},
    clap::Parser,
    std::{path::PathBuf, time::Duration},
    tracing::level_filters::LevelFilter,
    url::Url,
};

/// Deterministic deployment proxy that is predeployed (or can be deployed
/// keylessly) on virtually every EVM chain.
pub const CREATE2_PROXY: Address = address!("0x4e59b44847b379578588920ca78fbf26c0b4956c");

#[derive(Parser)]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Path to the TOML file describing what to deploy.
    #[clap(long, env)]
    pub config: PathBuf,

    /// The private key used to sign transactions. Expects a 32-byte hex
    /// encoded string. This can't be specified along with --mnemonic, exactly
    /// one of them must be specified.
    #[clap(long, env, conflicts_with = "mnemonic", required_unless_present = "mnemonic")]
    pub deployer_private_key: Option<String>,

    /// Mnemonic the deployer account is derived from.
    #[clap(long, env)]
    pub mnemonic: Option<String>,

    /// Derivation index of the deployer account when using --mnemonic.
    #[clap(long, env, default_value = "0")]
    pub deployer_index: u32,

    /// Directory containing the compiled contract artifacts.
    #[clap(long, env, default_value = "artifacts")]
    pub artifacts_dir: PathBuf,

    /// Directory of deployment records. Records are kept in a subdirectory
    /// per chain ID.
    #[clap(long, env, default_value = "deployments")]
    pub deployments_dir: PathBuf,

    /// Address of the CREATE2 deployment proxy.
    #[clap(long, env, default_value_t = CREATE2_PROXY)]
    pub create2_proxy: Address,

    /// Number of confirmations to wait for after each transaction.
    #[clap(long, env, default_value = "1")]
    pub confirmations: u64,

    /// How long to wait for a transaction to be confirmed before giving up.
    #[clap(
        long,
        env,
        default_value = "5m",
        value_parser = humantime::parse_duration,
    )]
    pub confirmation_timeout: Duration,
}

#[derive(Parser)]
pub struct LoggingArguments {
    #[clap(long, env, default_value = "warn,oracle_deployer=info,ethrpc=info")]
    pub log_filter: String,

    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: LevelFilter,

    /// Output log lines as JSON.
    #[clap(long, env)]
    pub log_json: bool,
}

impl LoggingArguments {
    pub fn observe_config(&self) -> observe::Config {
        observe::Config::new(
            &self.log_filter,
            self.log_stderr_threshold.into_level(),
            self.log_json,
        )
    }
}

/// Arg types have custom `Display` impls instead of relying on `Debug` to avoid
/// accidentally printing secrets. Secret values are printed as "SECRET".
impl std::fmt::Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            logging,
            node_url: _,
            config,
            deployer_private_key,
            mnemonic,
            deployer_index,
            artifacts_dir,
            deployments_dir,
            create2_proxy,
            confirmations,
            confirmation_timeout,
        } = self;

        write!(f, "{logging}")?;
        writeln!(f, "node_url: SECRET")?;
        writeln!(f, "config: {config:?}")?;
        writeln!(
            f,
            "deployer_private_key: {:?}",
            deployer_private_key.as_ref().map(|_| "SECRET")
        )?;
        writeln!(f, "mnemonic: {:?}", mnemonic.as_ref().map(|_| "SECRET"))?;
        writeln!(f, "deployer_index: {deployer_index}")?;
        writeln!(f, "artifacts_dir: {artifacts_dir:?}")?;
        writeln!(f, "deployments_dir: {deployments_dir:?}")?;
        writeln!(f, "create2_proxy: {create2_proxy}")?;
        writeln!(f, "confirmations: {confirmations}")?;
        writeln!(f, "confirmation_timeout: {confirmation_timeout:?}")?;
        Ok(())
    }
}

impl std::fmt::Display for LoggingArguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            log_json,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "log_json: {log_json}")?;
        Ok(())
    }
}
