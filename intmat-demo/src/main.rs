use std::error::Error;

use intmat_core::{IntMatrix, Matrix};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut a = IntMatrix::new(2, 3)?;
    let mut b = IntMatrix::new(3, 2)?;
    a.populate_random();
    b.populate_random();
    log::info!("Populated A ({}x{}) and B ({}x{})", a.rows(), a.cols(), b.rows(), b.cols());

    println!("A:\n{}", a);
    println!("B:\n{}", b);
    let product = a.multiply(&b)?;
    log::debug!("A * B occupies {} bytes", product.as_bytes().len());
    println!("A * B:\n{}", product);

    let c = IntMatrix::from_grid(&[[1, 2, 3], [4, 5, 6]])?;
    let d = IntMatrix::from_grid(&[[7, 8, 9], [10, 11, 12]])?;
    println!("C + D:\n{}", c.add(&d)?);

    Ok(())
}
