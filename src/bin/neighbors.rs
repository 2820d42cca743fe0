//! Prints the three nearest-neighbor distances of the first sample point.

use spam_predictor::neighbors::{SAMPLE_POINTS, nearest};

fn main() -> anyhow::Result<()> {
    let query = &SAMPLE_POINTS[0];
    for dist in nearest(&SAMPLE_POINTS, query, 3)? {
        println!("{}", dist);
    }
    Ok(())
}
