use clap::{Parser, Subcommand};
use railcut::{myu_distribution, report_best, report_one, BsEval};
use railcut_base::tt_from_hex;

#[derive(Parser)]
#[command(name = "railcut", about = "LUT cascade decomposition experiments")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Column multiplicity of one function under the natural split
    One {
        /// Truth table in hex, most significant digit first
        hex: String,
        #[arg(short = 'n', long)]
        vars: usize,
        /// Bound-set size (variables analysed on top)
        #[arg(short = 'b', long)]
        bound: usize,
    },
    /// Walk all splits and report the winner
    Best {
        hex: String,
        #[arg(short = 'n', long)]
        vars: usize,
        #[arg(short = 'b', long)]
        bound: usize,
        /// Score splits by rails after one shared variable
        #[arg(long)]
        shared: bool,
    },
    /// Multiplicity distribution over random functions
    Gen {
        #[arg(short = 'n', long)]
        vars: usize,
        #[arg(short = 'b', long)]
        bound: usize,
        #[arg(short = 'f', long, default_value_t = 100)]
        funcs: usize,
        /// Positive minterms per function; 0 draws uniform tables
        #[arg(short = 'm', long, default_value_t = 0)]
        mints: usize,
        /// Walk all splits of every function
        #[arg(long)]
        try_all: bool,
        #[arg(long)]
        shared: bool,
        #[arg(short = 's', long, default_value_t = 0)]
        seed: u64,
    },
    /// Find the bound and shared sets of one cascade stage
    Find {
        hex: String,
        #[arg(short = 'n', long)]
        vars: usize,
        /// LUT width of the stage
        #[arg(short = 'l', long)]
        lut: usize,
        #[arg(short = 'r', long, default_value_t = 1)]
        rails: usize,
        /// Variables held fixed at the top of the bound side
        #[arg(long, default_value_t = 0)]
        carry: usize,
        #[arg(long, default_value_t = 0)]
        jump_ratio: u32,
        /// Collect every split tied for best instead of a single winner
        #[arg(long)]
        all: bool,
        /// With --all: also keep candidates within this multiplicity slack
        /// of the running best
        #[arg(long, default_value_t = 0)]
        myu_increase: usize,
        /// With --all: random candidate subsets per sampling round, for
        /// functions too wide to walk (0 walks every split)
        #[arg(long, default_value_t = 0)]
        subsets: usize,
        /// With --all: sampled candidates kept per round
        #[arg(long, default_value_t = 0)]
        best: usize,
    },
}

fn main() -> railcut_base::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Command::One { hex, vars, bound } => {
            let tt = tt_from_hex(&hex, vars)?;
            println!("{}", report_one(&tt, vars, bound));
        }
        Command::Best { hex, vars, bound, shared } => {
            let mut tt = tt_from_hex(&hex, vars)?;
            println!("{}", report_best(&mut tt, vars, bound, shared));
        }
        Command::Gen { vars, bound, funcs, mints, try_all, shared, seed } => {
            let mut eval = BsEval::with_seed(seed);
            let dist = myu_distribution(&mut eval, vars, bound, funcs, mints, try_all, shared);
            print!("{}", dist);
        }
        Command::Find { hex, vars, lut, rails, carry, jump_ratio, all, myu_increase, subsets, best } => {
            let tt = tt_from_hex(&hex, vars)?;
            let mut eval = BsEval::new();
            if all {
                let found =
                    eval.find_split_all(&tt, vars, carry, rails, lut, myu_increase, subsets, best);
                if found.codes.is_empty() {
                    println!("no split fits {} rails (best myu = {})", rails, found.myu);
                } else {
                    println!(
                        "{} tied splits (best myu seen = {}):",
                        found.codes.len(),
                        found.myu
                    );
                    for code in &found.codes {
                        println!(
                            "myu = {}  bound = {:06x}  shared = {:06x}  packed = {:016x}",
                            code.myu,
                            code.bound_mask,
                            code.shared_mask,
                            code.pack()
                        );
                    }
                }
            } else {
                let found = eval.find_split(&tt, vars, carry, rails, lut, jump_ratio);
                match found.code {
                    Some(code) => println!(
                        "myu = {}  bound = {:06x}  shared = {:06x}  packed = {:016x}",
                        code.myu,
                        code.bound_mask,
                        code.shared_mask,
                        code.pack()
                    ),
                    None => println!("no split fits {} rails (walk myu = {})", rails, found.myu),
                }
            }
        }
    }
    Ok(())
}
