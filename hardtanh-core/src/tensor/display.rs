//! Pretty printing of tensors
use std::sync::Mutex;
use crate::{Tensor, WithDType};

// =================================================================================== //
//                      Debug
// =================================================================================== //

impl<T: WithDType> std::fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Tensor[")?;
        match self.dims() {
            [] => {
                if let Ok(v) = self.to_scalar() {
                    write!(f, "{v}")?
                }
            }
            [s] if *s < 10 => {
                for (i, v) in self.to_vec().unwrap_or_default().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
            }
            dims => {
                write!(f, "dims ")?;
                for (i, d) in dims.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{d}")?;
                }
            }
        }
        write!(f, "; {}]", self.dtype())
    }
}

// =================================================================================== //
//                  Options for Tensor pretty printing
// =================================================================================== //

#[derive(Debug, Clone)]
pub struct PrinterOptions {
    pub precision: usize,
}

static PRINT_OPTS: Mutex<PrinterOptions> = Mutex::new(PrinterOptions::const_default());

impl PrinterOptions {
    const fn const_default() -> Self {
        Self { precision: 4 }
    }
}

pub fn set_precision(precision: usize) {
    if let Ok(mut po) = PRINT_OPTS.lock() {
        po.precision = precision;
    }
}

fn precision() -> usize {
    PRINT_OPTS
        .lock()
        .map(|po| po.precision)
        .unwrap_or(PrinterOptions::const_default().precision)
}

// =================================================================================== //
//                      Display
// =================================================================================== //

fn fmt_value<T: WithDType>(v: T, prec: usize, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    if T::DTYPE.is_float() {
        write!(f, "{v:.prec$}")
    } else {
        write!(f, "{v}")
    }
}

fn fmt_nested<T: WithDType>(data: &[T], dims: &[usize], indent: usize, prec: usize, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "[")?;
    match dims {
        [] => {
            if let Some(&v) = data.first() {
                fmt_value(v, prec, f)?;
            }
        }
        [_] => {
            for (i, &v) in data.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                fmt_value(v, prec, f)?;
            }
        }
        [d, rest @ ..] => {
            let chunk = rest.iter().product::<usize>();
            for i in 0..*d {
                if i > 0 {
                    writeln!(f, ",")?;
                    write!(f, "{:indent$}", "", indent = indent + 1)?;
                }
                fmt_nested(&data[i * chunk..(i + 1) * chunk], rest, indent + 1, prec, f)?;
            }
        }
    }
    write!(f, "]")
}

impl<T: WithDType> std::fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.storage_read() {
            Ok(storage) => fmt_nested(storage.data(), self.dims(), 0, precision(), f)?,
            Err(err) => write!(f, "{err}")?,
        }
        writeln!(f)?;
        write!(f, "Tensor[{:?}, {}]", self.dims(), self.dtype())
    }
}

#[cfg(test)]
mod test {
    use crate::{Result, Tensor};

    #[test]
    fn test_debug() -> Result<()> {
        let a = Tensor::new(&[1f64, 2.5])?;
        assert_eq!(format!("{a:?}"), "Tensor[1, 2.5; float64]");
        let b = Tensor::<f32>::zeros((2, 3))?;
        assert_eq!(format!("{b:?}"), "Tensor[dims 2, 3; float32]");
        Ok(())
    }

    #[test]
    fn test_display_nested() -> Result<()> {
        let a = Tensor::new(&[[true, false], [false, true]])?;
        assert_eq!(format!("{a}"), "[[true, false],\n [false, true]]\nTensor[[2, 2], boolean]");
        Ok(())
    }
}
