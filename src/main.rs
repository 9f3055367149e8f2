use std::env;
use std::path::PathBuf;
use std::process;

use log::{error, LevelFilter};
use sobel_bench::batch::{self, BatchDriver, BatchSummary};
use sobel_bench::{Accelerator, BatchConfig, EdgeKernel, ReferenceKernel, ThreadedKernel};

static PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");

fn usage(program_name: Option<&str>) {
    println!(
        "Usage: {} [options] [<input-directory> <output-directory>]",
        program_name.unwrap_or(PACKAGE_NAME)
    );
    println!();
    println!(
        "Run Sobel edge detection on every PNG in the input directory with a CPU \
              and an accelerated kernel, timing both and writing cpu_* and gpu_* results."
    );
    println!();
    println!("Options:");
    println!("  -h, --help              print this help page instead of regular execution");
    println!("  -c, --config FILE       read settings from a TOML file");
    println!("  -a, --accelerator NAME  accelerated kernel: [t]hreaded or [r]eference");
    println!("  -t, --threads NUM       threads of the accelerated kernel, 0 for one per core");
    println!("  -j, --jobs NUM          process NUM images concurrently");
    println!("      --tolerance VALUE   largest per-pixel difference accepted between kernels");
    println!();
    println!("Set RUST_LOG to change the log level (default: info).");
}

/// Settings given on the command line, applied on top of the config file.
#[derive(Debug, Default, PartialEq)]
struct Invocation {
    help: bool,
    config_path: Option<PathBuf>,
    input_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    accelerator: Option<Accelerator>,
    kernel_threads: Option<usize>,
    jobs: Option<usize>,
    tolerance: Option<f32>,
}

impl Invocation {
    fn apply(&self, config: &mut BatchConfig) {
        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(accelerator) = self.accelerator {
            config.accelerator = accelerator;
        }
        if let Some(threads) = self.kernel_threads {
            config.kernel_threads = threads;
        }
        if let Some(jobs) = self.jobs {
            config.jobs = jobs;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
    }
}

fn parse_arguments(args: &[String]) -> Result<Invocation, String> {
    let mut invocation = Invocation::default();
    let mut parameters = Vec::new();
    let mut i = 1;
    while i < args.len() {
        let arg = &args[i];
        let mut get_parameter = || -> Result<&String, String> {
            if i + 1 >= args.len() {
                return Err(format!("Option '{}' expects parameter!", arg));
            }
            i += 1;
            return Ok(&args[i]);
        };
        match arg.as_str() {
            s if !s.starts_with('-') => parameters.push(PathBuf::from(arg)),
            "-h" | "--help" => invocation.help = true,
            "-c" | "--config" => invocation.config_path = Some(PathBuf::from(get_parameter()?)),
            "-a" | "--accelerator" => match get_parameter()?.parse::<Accelerator>() {
                Ok(accelerator) => invocation.accelerator = Some(accelerator),
                _ => return Err("Unknown accelerator!".to_string()),
            },
            "-t" | "--threads" => match get_parameter()?.parse::<usize>() {
                Ok(num) => invocation.kernel_threads = Some(num),
                _ => return Err("Threads must be a non-negative integer!".to_string()),
            },
            "-j" | "--jobs" => match get_parameter()?.parse::<usize>() {
                Ok(0) => return Err("Jobs cannot be 0!".to_string()),
                Ok(num) => invocation.jobs = Some(num),
                _ => return Err("Jobs must be a positive integer!".to_string()),
            },
            "--tolerance" => match get_parameter()?.parse::<f32>() {
                Ok(value) if value >= 0.0 => invocation.tolerance = Some(value),
                _ => return Err("Tolerance must be a non-negative number!".to_string()),
            },
            _ => return Err(format!("Unknown option '{}'!", arg)),
        }
        i += 1;
    }

    match parameters.len() {
        0 => {}
        2 => {
            invocation.output_dir = parameters.pop();
            invocation.input_dir = parameters.pop();
        }
        1 => return Err("Output directory missing!".to_string()),
        _ => return Err("Too many arguments!".to_string()),
    }
    return Ok(invocation);
}

fn usage_and_exit(program_name: Option<&str>, problem: Option<&str>) -> ! {
    let mut code = 0;
    if let Some(problem) = problem {
        eprintln!("{}", problem);
        code = 1;
    }
    usage(program_name);
    process::exit(code);
}

fn run_with<A: EdgeKernel>(
    config: BatchConfig, accelerated: A,
) -> sobel_bench::Result<BatchSummary> {
    return BatchDriver::new(config, ReferenceKernel, accelerated).run();
}

fn main() {
    env_logger::Builder::new().filter_level(LevelFilter::Info).parse_default_env().init();

    let args: Vec<String> = env::args().collect();
    let program_name: Option<&str> = args.first().map(String::as_str);

    let invocation = match parse_arguments(&args) {
        Ok(invocation) => invocation,
        Err(problem) => usage_and_exit(program_name, Some(problem.as_str())),
    };
    if invocation.help {
        usage_and_exit(program_name, None);
    }

    let mut config = match &invocation.config_path {
        Some(path) => match BatchConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        },
        None => BatchConfig::default(),
    };
    invocation.apply(&mut config);
    if let Err(e) = config.validate() {
        usage_and_exit(program_name, Some(e.to_string().as_str()));
    }

    let output_dir = config.output_dir.clone();
    let result = match config.accelerator {
        Accelerator::Threaded => match ThreadedKernel::new(config.kernel_threads) {
            Ok(kernel) => run_with(config, kernel),
            Err(e) => Err(e),
        },
        Accelerator::Reference => run_with(config, ReferenceKernel),
    };

    match result {
        Ok(summary) => batch::log_summary(&summary, &output_dir),
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    }
}
