//! Generate a tiny initial-condition file: one gas particle at the centre and
//! two halo particles around it, all at rest with unit mass (Gadget units).
//!
//! ```text
//! cargo run --example generate_ic -- [output path] [forbid|overwrite]
//! ```

use gadget_ic::{dump, Body, GadgetError, Header, OverwritePolicy};
use nalgebra::Vector3;

fn main() -> Result<(), GadgetError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut args = std::env::args().skip(1);
    let destination = args.next().unwrap_or_else(|| "./test_ic.dat".to_string());
    let policy = match args.next() {
        Some(policy) => policy.parse::<OverwritePolicy>()?,
        None => OverwritePolicy::default(),
    };

    let npart = [1, 2, 0, 0, 0, 0];
    let header = Header::new(npart);
    let mut body = Body::new(npart)?;

    body.pos[0] = Vector3::zeros();
    body.pos[1] = Vector3::new(1.0, 1.0, 1.0);
    body.pos[2] = Vector3::new(-1.0, 0.0, 1.0);
    body.id = (0..body.n_total() as u64).collect();
    body.mass.fill(1.0);

    println!("{header}");
    dump(&header, &body, destination.as_str(), policy)?;
    println!("{}", body.summary());
    Ok(())
}
