use std::{env, fs::File, io, process};

use anyhow::Context;
use seq2seq_complexity::{config, ComplexityReport, NumberFormat};

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {program} <model_info.json|-> [--json] [--format plain|grouped|indian|compact]"
    );
    process::exit(1);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("complexity-report");

    let mut path = None;
    let mut json = false;
    let mut format = NumberFormat::default();

    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--format" => {
                let name = rest.next().unwrap_or_else(|| usage(program));
                format = NumberFormat::from_name(name).unwrap_or_else(|| {
                    eprintln!("Unknown format: {name}");
                    usage(program)
                });
            }
            _ if path.is_none() => path = Some(arg.as_str()),
            _ => usage(program),
        }
    }

    let path = path.unwrap_or_else(|| usage(program));
    log::info!("reading model info from {path}");

    let (model, measured) = if path == "-" {
        config::read_record(io::stdin().lock())
    } else {
        let file = File::open(path).with_context(|| format!("cannot open '{path}'"))?;
        config::read_record(io::BufReader::new(file))
    }
    .with_context(|| format!("cannot load model info from '{path}'"))?;

    let report = ComplexityReport::new(model, measured, format);

    if json {
        serde_json::to_writer_pretty(io::stdout().lock(), &report)?;
        println!();
    } else {
        println!("{report}");
    }

    Ok(())
}
