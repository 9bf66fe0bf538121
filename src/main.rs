//! # Voxel World Demo Entry Point
//!
//! Generates a noise terrain world and meshes it, logging what was built.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- world.json
//! ```

fn main() {
    voxel_world::run();
}
