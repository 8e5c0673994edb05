use hardtanh_core::{Tensor, Var};
use hardtanh_nn::{LeakyHardtanh, Module};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let m = LeakyHardtanh::<f64>::default();
    println!("{}", m.display());

    let xs = Tensor::new(&[-3.0, -1.0, 0.0, 1.0, 3.0])?;
    let ys = m.forward(&xs)?;
    println!("{ys}");

    let m = LeakyHardtanh::<f64>::new(-2.0, 2.0, 0.001, 0.001)?;
    let ys = m.forward(&Tensor::new(&[5.0])?)?;
    println!("{} -> {ys}", m.display());

    let x = Var::<f64>::new(&[-5.0, 0.0])?;
    let grads = LeakyHardtanh::default().forward(&x)?.backward()?;
    let grad = grads.get(&x).ok_or_else(|| anyhow::anyhow!("no gradient for input"))?;
    println!("grad: {grad}");

    match LeakyHardtanh::<f32>::new(2.0, 1.0, 0.01, 0.01) {
        Ok(_) => anyhow::bail!("inverted bounds were accepted"),
        Err(e) => println!("rejected: {e}"),
    }

    Ok(())
}
