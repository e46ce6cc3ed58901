use clap::Args;
use fwtools_core::{CancelToken, CutConfig, Cutter};

#[derive(Args)]
pub struct CutArgs {
    /// Input dump files; each gets its own `<name>-cutted.bin` output
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Page size in bytes, copied to the output
    #[arg(short = 'p', long, default_value_t = 0x400)]
    pub page: usize,

    /// Metadata size in bytes, skipped after every page
    #[arg(short = 's', long, default_value_t = 0x20)]
    pub skip: usize,

    /// Worker ceiling for multi-file runs
    #[arg(long, default_value_t = fwtools_core::pool::DEFAULT_JOBS)]
    pub jobs: usize,
}

pub fn run(args: CutArgs) -> anyhow::Result<()> {
    let cfg = CutConfig {
        page_size: args.page,
        skip_size: args.skip,
        jobs: args.jobs,
    };
    cfg.validate()?;

    let mut cutter = Cutter::new(cfg);
    cutter.open(&args.files)?;

    let token = CancelToken::new();
    let run_res = cutter.run(&token);
    let close_res = cutter.close();
    run_res?;
    close_res?;

    eprintln!(
        "cut ok: files={} page={} skip={}",
        args.files.len(),
        args.page,
        args.skip
    );
    Ok(())
}
