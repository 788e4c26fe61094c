//! Monte Carlo check that random circuits over {I, H, X} with single
//! controlled-X columns leave the squared norm of the state unchanged.

use nqsim::{ Circuit, StateVector };
use rand::{ rngs::StdRng, Rng, SeedableRng };
use rayon::iter::{ IntoParallelIterator, ParallelIterator };
use tracing::{ info, warn };
use tracing_subscriber::EnvFilter;

// largest deviation of the final squared norm from 1 over `mc` circuits
fn max_norm_drift(n: usize, depth: usize, p_cx: f64, mc: usize) -> f64 {
    (0..mc).into_par_iter()
        .map(|k| {
            let mut rng = StdRng::seed_from_u64((n * mc + k) as u64);
            let circuit = Circuit::sample(n, depth, p_cx, &mut rng);
            let index = rng.gen_range(0..1_usize << n);
            let mut state = match StateVector::basis(n, index) {
                Ok(state) => state,
                Err(err) => { warn!(%err, "skipping sample"); return 0.0; },
            };
            match circuit.run(&mut state) {
                Ok(state) => (state.norm_sqr() - 1.0).abs(),
                Err(err) => { warn!(%err, "skipping sample"); 0.0 },
            }
        })
        .reduce(|| 0.0, f64::max)
}

fn main() {
    const MC: usize = 200;
    const DEPTH: usize = 40;
    const P_CX: f64 = 0.3;
    const TOL: f64 = 1e-10;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    for n in 1..=8 {
        let drift = max_norm_drift(n, DEPTH, P_CX, MC);
        info!(qubits = n, samples = MC, depth = DEPTH, "done");
        println!("n = {:>2}: max |norm² - 1| = {:.3e}", n, drift);
        if drift > TOL {
            warn!(qubits = n, drift, "norm drift above tolerance");
        }
    }
}
