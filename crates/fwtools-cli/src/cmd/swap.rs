use clap::Args;
use fwtools_core::{CancelToken, SwapConfig, Swapper};

#[derive(Args)]
pub struct SwapArgs {
    /// Input dump files; each gets its own suffixed output
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Inverse bits in byte
    #[arg(long)]
    pub bits: bool,

    /// Swap halfs of byte
    #[arg(long)]
    pub halfs: bool,

    /// Swap neighbor bytes
    #[arg(short = 'b', long)]
    pub bytes: bool,

    /// Swap neighbor words
    #[arg(short = 'w', long)]
    pub words: bool,

    /// Swap neighbor dwords
    #[arg(short = 'd', long)]
    pub dwords: bool,

    /// Worker ceiling for multi-file runs
    #[arg(long, default_value_t = fwtools_core::pool::DEFAULT_JOBS)]
    pub jobs: usize,
}

pub fn run(args: SwapArgs) -> anyhow::Result<()> {
    let cfg = SwapConfig {
        bits: args.bits,
        halfs: args.halfs,
        bytes: args.bytes,
        words: args.words,
        dwords: args.dwords,
        jobs: args.jobs,
    };

    let mut swapper = Swapper::new(cfg);
    swapper.open(&args.files)?;

    let token = CancelToken::new();
    let run_res = swapper.run(&token);
    let close_res = swapper.close();
    run_res?;
    close_res?;

    eprintln!(
        "swap ok: files={} transforms={}",
        args.files.len(),
        cfg.transforms()
            .iter()
            .map(|k| k.suffix().trim_start_matches('-'))
            .collect::<Vec<_>>()
            .join(",")
    );
    Ok(())
}
