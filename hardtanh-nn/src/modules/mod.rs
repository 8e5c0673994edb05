mod activation;

pub use activation::*;

use std::any::type_name;
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;
use hardtanh_core::{FloatDType, Tensor};
use crate::NnError;

// ============================================================================================ //
//                        Module and ModuleInit trait
// ============================================================================================ //

pub trait Module<T: FloatDType> : Sized {
    // ================================================================= //
    //                           Visitor
    // ================================================================= //

    #[allow(unused_variables)]
    fn visit_param<Visitor: TensorVisitor<T>>(&self, visitor: &mut Visitor) -> Result<(), Visitor::Error> {
        Ok(())
    }

    fn visit_module<Visitor: ModuleVisitor<T>>(&self, visitor: &mut Visitor) -> Result<(), Visitor::Error> {
        visitor.visit_module(self)?;
        visitor.visit_module_end(self)
    }

    // ================================================================= //
    //                     Module Visitor Method
    // ================================================================= //

    fn module_name() -> &'static str {
        let full_name = type_name::<Self>();
        let path = full_name.split('<').next().unwrap_or(full_name);
        path.rsplit("::").next().unwrap_or(path)
    }

    fn display(&self) -> ModuleDisplayer<'_, Self, T> {
        ModuleDisplayer { module: self, _marker: PhantomData }
    }

    // ================================================================= //
    //                     Tensor Visitor Method
    // ================================================================= //

    fn requires_grad(&self, mode: bool) {
        self.for_each_param(|param| param.set_requires_grad(mode));
    }

    fn param_count(&self) -> usize {
        let mut count = 0;
        self.for_each_param(|_| count += 1);
        count
    }

    fn param_element_count(&self) -> usize {
        let mut count = 0;
        self.for_each_param(|param| count += param.element_count());
        count
    }

    fn params(&self) -> Vec<Tensor<T>> {
        let mut params = vec![];
        self.for_each_param(|param| params.push(param.clone()));
        params
    }

    fn for_each_param<F: FnMut(&Tensor<T>)>(&self, f: F) {
        let mut visitor = ParamFn(f);
        match self.visit_param(&mut visitor) {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    // ================================================================= //
    //                     Override method
    // ================================================================= //

    fn extra_repr(&self) -> String {
        String::new()
    }
}

/// Modules built from a configuration, which may reject it.
pub trait ModuleInit<T: FloatDType> : Module<T> {
    type Error: From<NnError>;
    type Config;

    fn init(config: &Self::Config) -> Result<Self, Self::Error>;
}

// ============================================================================================ //
//                        Visitor  traits
// ============================================================================================ //

pub trait ModuleVisitor<T: FloatDType> {
    type Error;

    #[allow(unused_variables)]
    fn visit_module<M: Module<T>>(&mut self, module: &M) -> Result<(), Self::Error> {
        Ok(())
    }

    #[allow(unused_variables)]
    fn visit_module_end<M: Module<T>>(&mut self, module: &M) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub trait TensorVisitor<T: FloatDType> {
    type Error;

    #[allow(unused_variables)]
    fn visit_param(&mut self, param: &Tensor<T>) -> Result<(), Self::Error> {
        Ok(())
    }
}

//===========================================================================//
//         Util Visitor
//===========================================================================//

/// Runs a closure on every parameter; cannot fail.
struct ParamFn<F>(F);

impl<T: FloatDType, F: FnMut(&Tensor<T>)> TensorVisitor<T> for ParamFn<F> {
    type Error = Infallible;

    fn visit_param(&mut self, param: &Tensor<T>) -> Result<(), Self::Error> {
        (self.0)(param);
        Ok(())
    }
}

//===========================================================================//
//         Display
//===========================================================================//

pub struct ModuleDisplayer<'a, M, T> {
    pub module: &'a M,
    pub _marker: PhantomData<T>,
}

impl<M, T> fmt::Display for ModuleDisplayer<'_, M, T>
where
    M: Module<T>,
    T: FloatDType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut visitor = DisplayVisitor { f };
        self.module.visit_module(&mut visitor)
    }
}

struct DisplayVisitor<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
}

impl<T: FloatDType> ModuleVisitor<T> for DisplayVisitor<'_, '_> {
    type Error = fmt::Error;

    fn visit_module<M: Module<T>>(&mut self, module: &M) -> Result<(), Self::Error> {
        write!(self.f, "{}({}", M::module_name(), module.extra_repr())
    }

    fn visit_module_end<M: Module<T>>(&mut self, _module: &M) -> Result<(), Self::Error> {
        write!(self.f, ")")
    }
}

#[cfg(test)]
mod test {
    use hardtanh_core::Tensor;
    use crate::NnResult;
    use super::{Module, TensorVisitor};

    struct Scale {
        weight: Tensor<f64>,
    }

    impl Module<f64> for Scale {
        fn visit_param<Visitor: TensorVisitor<f64>>(&self, visitor: &mut Visitor) -> Result<(), Visitor::Error> {
            visitor.visit_param(&self.weight)
        }
    }

    #[test]
    fn test_param_visitors() -> NnResult<()> {
        let m = Scale { weight: Tensor::ones((2, 3))? };
        assert_eq!(m.param_count(), 1);
        assert_eq!(m.param_element_count(), 6);
        assert!(m.params()[0] == m.weight);

        assert!(!m.weight.requires_grad());
        m.requires_grad(true);
        assert!(m.weight.requires_grad());
        m.requires_grad(false);
        assert!(!m.weight.requires_grad());
        Ok(())
    }

    #[test]
    fn test_display_without_extra_repr() {
        assert_eq!(Scale::module_name(), "Scale");
        let m = Scale { weight: Tensor::zeros(1).unwrap() };
        assert_eq!(m.display().to_string(), "Scale()");
    }
}
