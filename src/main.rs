//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    process::exit,
};

use log::{error, info, warn};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use huffpack::{
    compression::{compress::Encoded, decompress::check_round_trip},
    huffman_coding::{build, serialize, serialize::RECORD_BYTES, CodeTable},
    tools::{
        cli::{init_opts, HuffOpts, Mode},
        freq_count::freqs,
    },
    HuffError, Result,
};

fn main() {
    let opts = init_opts();

    if let Err(e) = TermLogger::init(
        opts.verbose,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Unable to start the logger: {}", e);
    }
    opts.report();

    //----- Figure how what we need to do and go do it
    let result = fs::read(&opts.file)
        .map_err(HuffError::from)
        .and_then(|data| match opts.op_mode {
            Mode::Table => write_table(&opts, &data),
            Mode::Codes => print_codes(&data),
            Mode::Verify => verify(&data),
        });

    match result {
        Ok(()) => info!("Done."),
        Err(e) => {
            error!("{}: {}", opts.file, e);
            exit(1);
        }
    }
}

/// Build the table for `data` and write it to the output file.
fn write_table(opts: &HuffOpts, data: &[u8]) -> Result<()> {
    let table = serialize(&build(&freqs(data)?)?);

    let mut f_out = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .create_new(!opts.force_overwrite)
        .open(&opts.output)
        .map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                warn!("{} exists, use -f to overwrite it", opts.output);
            }
            e
        })?;
    f_out.write_all(&table)?;
    info!(
        "Wrote {} node records ({} bytes) to {}",
        table.len() / RECORD_BYTES,
        table.len(),
        opts.output
    );
    Ok(())
}

/// Print the code of every symbol in `data`.
fn print_codes(data: &[u8]) -> Result<()> {
    let counts = freqs(data)?;
    let codes = CodeTable::from_tree(&build(&counts)?);
    print!("{}", codes);
    println!(
        "{} symbols, {} bytes in, {} bits of codes",
        codes.len(),
        data.len(),
        codes.encoded_bits(&counts)
    );
    Ok(())
}

/// Encode `data`, decode it again through the serialized table and compare.
fn verify(data: &[u8]) -> Result<()> {
    let enc = Encoded::from_data(data)?;
    check_round_trip(&enc, data)?;
    println!(
        "ok: {} bytes -> {} byte table + {} bytes of codes",
        data.len(),
        enc.table.len(),
        enc.packed.bytes.len()
    );
    Ok(())
}
