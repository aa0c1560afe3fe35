//! Decodes a BEVE file given on the command line and pretty-prints the
//! resulting value tree.
//!
//! This binary is pure external plumbing around [`beve::decode_file`] —
//! acquiring the path is the only thing it does, in keeping with BEVE's
//! decoder proper treating CLI argument parsing as out of scope.

use beve::value::Value;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "beve-dump")]
#[command(about = "Decode and print a .beve file", long_about = None)]
struct Cli {
    /// Path to the BEVE document to decode.
    path: String,

    /// Maximum container nesting depth before giving up.
    #[arg(long, default_value_t = 1024)]
    max_depth: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let opts = beve::DecodeOptions {
        max_depth: args.max_depth,
    };
    let file = std::fs::File::open(&args.path)?;
    let value = beve::decode_with_options(file, &opts)?;

    print_value(&value, 0);
    Ok(())
}

fn print_value(value: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        Value::Object(obj) => {
            println!("{pad}object ({} entries)", obj.len());
            for (key, val) in obj.iter() {
                println!("{pad}  {key}:");
                print_value(val, indent + 2);
            }
        }
        Value::Array(items) => {
            println!("{pad}array ({} items)", items.len());
            for item in items {
                print_value(item, indent + 1);
            }
        }
        other => println!("{pad}{other:?}"),
    }
}
