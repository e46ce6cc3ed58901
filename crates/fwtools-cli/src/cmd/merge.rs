use clap::Args;
use fwtools_core::{CancelToken, MergeConfig, MergeMode, Merger};

#[derive(Args)]
pub struct MergeArgs {
    /// Input dump files, interleaved in the order given; all must have
    /// the same byte length
    #[arg(required = true, num_args = 2..)]
    pub files: Vec<String>,

    /// Merge by bits in byte
    #[arg(long, group = "mode")]
    pub bits: bool,

    /// Merge by bytes
    #[arg(short = 'b', long, group = "mode")]
    pub bytes: bool,

    /// Merge by words
    #[arg(short = 'w', long, group = "mode")]
    pub words: bool,

    /// Merge by dwords
    #[arg(short = 'd', long, group = "mode")]
    pub dwords: bool,

    /// Output path
    #[arg(short = 'o', long)]
    pub output: Option<String>,
}

fn mode_of(args: &MergeArgs) -> Option<MergeMode> {
    // the clap group keeps these mutually exclusive
    if args.bits {
        Some(MergeMode::Bits)
    } else if args.bytes {
        Some(MergeMode::Bytes)
    } else if args.words {
        Some(MergeMode::Words)
    } else if args.dwords {
        Some(MergeMode::Dwords)
    } else {
        None
    }
}

pub fn run(args: MergeArgs) -> anyhow::Result<()> {
    let cfg = MergeConfig {
        mode: mode_of(&args),
        output: args.output.clone(),
    };

    let mut merger = Merger::new(cfg);
    merger.open(&args.files)?;

    let token = CancelToken::new();
    let run_res = merger.run(&token);
    let close_res = merger.close();
    run_res?;
    close_res?;

    eprintln!(
        "merge ok: files={} out={}",
        args.files.len(),
        args.output
            .as_deref()
            .unwrap_or(fwtools_core::merge::DEFAULT_OUTPUT)
    );
    Ok(())
}
