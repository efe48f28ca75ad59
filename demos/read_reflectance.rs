//! Prints the metadata and a pixel spectrum of a NEON reflectance tile.
//!
//! `RUST_LOG=debug cargo run --example read_reflectance -- NEON_D02_SERC_DP3_368000_4306000_reflectance.h5`

use neon_reflectance::{keys, load, Result};

fn main() -> Result<()> {
    env_logger::init();
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: read_reflectance <reflectance.h5>");
        std::process::exit(2);
    };

    let dataset = load(&path)?;
    println!("site {} shape {:?}", dataset.site(), dataset.shape());
    for key in keys::ALL {
        match dataset.metadata().get(key)? {
            neon_reflectance::MetadataValue::Floats(values) if values.len() > 8 => {
                println!("{key}: {} values", values.len())
            }
            value => println!("{key}: {value}"),
        }
    }

    let clean = dataset.without_bad_bands()?;
    println!(
        "{} of {} bands outside water vapour windows",
        clean.band_count(),
        dataset.band_count()
    );
    let (rows, cols, _) = clean.shape();
    if let Some(spectrum) = clean.spectrum(rows / 2, cols / 2) {
        let scale = clean.metadata().scale_factor()?;
        for (wavelength, value) in spectrum.iter().step_by(20) {
            println!("{wavelength:>8.1} nm  {:.4}", f64::from(*value) / scale);
        }
    }
    Ok(())
}
