//! Decode an animation sequence payload from stdin and print it as JSON.
//!
//! Unrecognized opcodes are reported on stderr (`RUST_LOG=warn`).

use std::{
    error,
    io::{self, BufWriter, Read},
};

fn main() -> Result<(), Box<dyn error::Error>> {
    env_logger::init();

    let mut data = Vec::new();
    io::stdin().read_to_end(&mut data)?;
    let definition = rscodec::anim::AnimationDefinition::decode(&data)?;

    let stdout = io::stdout().lock();
    let writer = BufWriter::new(stdout);
    serde_json::to_writer_pretty(writer, &definition)?;
    Ok(())
}
