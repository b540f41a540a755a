use clap::CommandFactory;
use clap::Parser;
use clap::error::ErrorKind;
use robin_hash::HashTable;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    /// Remove every n-th key after filling, leaving tombstones behind.
    #[arg(short = 'r', long = "remove_every", default_value_t = 0)]
    remove_every: u32,
}

/// Keys are `0..target_capacity`, so the target must fit in a `u32`.
fn key_count(target_capacity: usize) -> Result<u32, String> {
    u32::try_from(target_capacity)
        .map_err(|_| format!("target capacity {target_capacity} exceeds the u32 key space"))
}

fn main() {
    let args = Args::parse();
    let num_values = match key_count(args.target_capacity) {
        Ok(count) => count,
        Err(message) => Args::command()
            .error(ErrorKind::ValueValidation, message)
            .exit(),
    };

    println!(
        "Creating HashTable with target capacity: {}",
        args.target_capacity
    );

    let mut table: HashTable<u64> = HashTable::with_capacity(args.target_capacity);

    println!("Actual capacity: {} slots", table.capacity());
    println!("Filling table with u64 values...");

    for key in 0..num_values {
        table.insert(key, key as u64);
    }

    println!("Inserted {} values into table", table.len());

    if args.remove_every > 0 {
        let mut removed = 0;
        for key in (0..num_values).step_by(args.remove_every as usize) {
            if table.remove(key) {
                removed += 1;
            }
        }
        println!("Removed {} values", removed);
    }

    println!(
        "Final load factor: {:.2}%",
        (table.len() as f64 / table.capacity() as f64) * 100.0
    );

    table.probe_histogram().print();
    table.debug_stats().print();
}
