use adt_reader::{Layout, Table};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-adt-file> [--encoding <LABEL>] [--limit <N>]", args[0]);
        std::process::exit(1);
    }

    let adt_path = &args[1];
    let mut layout = Layout::default();
    let mut limit: usize = 10;

    // Parse --encoding argument
    if let Some(idx) = args.iter().position(|arg| arg == "--encoding") {
        match args.get(idx + 1) {
            Some(label) => layout = layout.with_encoding(adt_reader::adt::parse_encoding(label)),
            None => {
                eprintln!("ERROR: --encoding flag requires an argument.");
                std::process::exit(1);
            }
        }
    }
    // Parse --limit argument
    if let Some(idx) = args.iter().position(|arg| arg == "--limit") {
        match args.get(idx + 1).and_then(|n| n.parse().ok()) {
            Some(n) => limit = n,
            None => {
                eprintln!("ERROR: --limit flag requires a number.");
                std::process::exit(1);
            }
        }
    }

    println!("Reading ADT file: {}", adt_path);
    println!("{}", "=".repeat(60));

    let table = match Table::open_with_layout(adt_path, layout) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("\nERROR: Failed to read ADT file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    println!("\nTable Information:");
    println!("  Name: {}", table.base_name().unwrap_or("-"));
    println!("  Records: {}", table.record_count());
    println!("  Record length: {} bytes", table.record_length());
    println!("  Data offset: {}", table.data_offset());
    println!("  Encoding: {}", table.layout().encoding.name());

    println!("\nColumns ({}):", table.columns().len());
    for column in table.columns() {
        println!(
            "  {:<30} {:<12} {:>5}   {}",
            column.name(),
            column.column_type().to_string(),
            column.length(),
            column.schema_data_type()
        );
    }

    println!("\nSample Records (first {}):", limit);
    for (i, result) in table.each().take(limit).enumerate() {
        match result {
            Ok(Some(record)) => {
                let values: Vec<String> = record.to_a().iter().map(ToString::to_string).collect();
                println!("  {}. {}", i + 1, values.join(" | "));
            }
            Ok(None) => println!("  {}. <no record>", i + 1),
            Err(e) => println!("  {}. ERROR: {}", i + 1, e),
        }
    }

    if table.record_count() as usize > limit {
        println!("  ... and {} more", table.record_count() as usize - limit);
    }

    table.close();
}
