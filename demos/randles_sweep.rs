use eis::prelude::*;

fn main() -> eis::errors::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Randles cell with a Warburg diffusion tail.
    let mut circuit = Circuit::new("Rs - (Cdl | (Rct - W))")?;
    circuit.set_components([
        ("Rs1", 20.0),     // 20 Ω electrolyte
        ("Cdl1", 20.0e-6), // 20 µF double layer
        ("Rct1", 250.0),   // 250 Ω charge transfer
        ("W1", 40.0),
    ])?;

    println!("# postfix: {}", circuit.postfix());

    let points = impedance_sweep(&circuit, log_grid(1.0e-2, 1.0e5, 36))?;

    println!("f(Hz), Z_real(ohm), -Z_imag(ohm), |Z|(ohm), phase(deg)");
    for p in &points {
        let (re, neg_im) = p.nyquist();
        println!(
            "{:.6e}, {:.6e}, {:.6e}, {:.6e}, {:.3}",
            p.frequency,
            re,
            neg_im,
            p.magnitude(),
            p.phase_deg()
        );
    }
    Ok(())
}
