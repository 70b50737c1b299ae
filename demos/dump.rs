//! Dump the contents of a .pkt file
//!
//! Run with: cargo run --example dump -- path/to/file.pkt

use fidopkt::decode_packet_partial;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::args().nth(1).ok_or("usage: dump <file.pkt>")?;
    let data = std::fs::read(&path)?;

    let decoded = decode_packet_partial(&data);
    if let Some(header) = &decoded.header {
        println!("Packet {} -> {}", header.origin(), header.destination());
        match header.created() {
            Some(created) => println!("Created: {}", created),
            None => println!("Created: (invalid timestamp)"),
        }
        println!("Password: {:?}", header.password());
    }

    for (i, message) in decoded.messages.iter().enumerate() {
        println!();
        println!("#{} {}", i + 1, message.date_time);
        println!("From: {} ({})", message.from_name, message.from_addr);
        println!("To:   {} ({})", message.to_name, message.to_addr);
        println!("Subj: {}", message.subject);
        let mut kludges: Vec<_> = message.kludges().into_iter().collect();
        kludges.sort();
        for (name, value) in kludges {
            println!("  {}: {}", name, value);
        }
        print!("{}", message.body());
    }

    if let Some(error) = decoded.error {
        eprintln!("Decode stopped: {}", error);
        std::process::exit(1);
    }
    Ok(())
}
