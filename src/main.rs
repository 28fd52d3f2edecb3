use std::error::Error;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use huffman_canon::HuffmanCodec;
use log::LevelFilter;

const USAGE: &str = "usage: huffman <compress|decompress> <input> <output>";

fn init_logging() {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Info);
    builder.parse_default_env();
    builder.format(|buf, record| {
        writeln!(buf, "[{}] {}", record.level(), record.args())
    });
    let _ = builder.try_init();
}

fn report(err: &dyn Error) {
    eprintln!("error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [mode, input, output] = args.as_slice() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };
    let (input, output) = (Path::new(input), Path::new(output));

    let outcome = match mode.as_str() {
        "compress" => HuffmanCodec::compress_file(input, output).map(|summary| {
            log::info!(
                "{} -> {}: {} bytes in, {} bytes out, {} distinct symbols",
                input.display(),
                output.display(),
                summary.input_bytes,
                summary.output_bytes,
                summary.distinct_symbols
            );
        }),
        "decompress" => HuffmanCodec::decompress_file(input, output).map(|written| {
            log::info!(
                "{} -> {}: {written} bytes restored",
                input.display(),
                output.display()
            );
        }),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}
