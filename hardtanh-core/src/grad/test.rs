
#[cfg(test)]
mod test {
    use crate::{is_grad_enabled, NoGradGuard, Tensor, Var};

    #[test]
    fn test_binary() -> crate::Result<()> {
        let a = Var::<f64>::from_vec(vec![1.; 9], (3, 3))?;
        let b = Var::<f64>::new(&[
            [1., 2., 3.],
            [4., 5., 6.],
            [7., 8., 9.],
        ])?;

        let c = a.mul(&b)?;

        let grads = c.backward()?;

        assert!(grads[&b].allclose(&a, 1e-5, 8e-8)?);
        assert!(grads[&a].allclose(&b, 1e-5, 8e-8)?);

        Ok(())
    }

    #[test]
    fn test_division() -> crate::Result<()> {
        let a = Var::<f64>::new(&[6.0, 10.0])?;
        let b = Var::<f64>::new(&[2.0, 5.0])?;

        let c = a.div(&b)?;
        let grads = c.backward()?;

        // dc/da = 1/b
        let expected_a_grad = Tensor::new(&[0.5, 0.2])?;
        assert!(grads[&a].allclose(&expected_a_grad, 1e-5, 1e-8)?);

        // dc/db = -a / b^2
        let expected_b_grad = Tensor::new(&[-1.5, -0.4])?;
        assert!(grads[&b].allclose(&expected_b_grad, 1e-5, 1e-8)?);
        Ok(())
    }

    #[test]
    fn test_chain_rule() -> crate::Result<()> {
        let a = Var::<f64>::new(&[2.0, 3.0])?;
        let b = Var::<f64>::new(&[4.0, 5.0])?;

        // c = (a + b) * a = a^2 + ab
        let c = a.add(&b)?.mul(&a)?;
        let grads = c.backward()?;

        // dc/da = 2a + b
        let expected_a_grad = Tensor::new(&[8.0, 11.0])?;
        assert!(grads[&a].allclose(&expected_a_grad, 1e-5, 1e-8)?);

        // dc/db = a
        assert!(grads[&b].allclose(&a, 1e-5, 1e-8)?);
        Ok(())
    }

    #[test]
    fn test_sub_and_neg() -> crate::Result<()> {
        let a = Var::<f64>::new(&[1.0, -2.0])?;
        let b = Var::<f64>::new(&[3.0, 4.0])?;

        let c = a.sub(&b)?.neg()?;
        let grads = c.backward()?;

        assert!(grads[&a].allclose(&Tensor::new(&[-1.0, -1.0])?, 1e-5, 1e-8)?);
        assert!(grads[&b].allclose(&Tensor::new(&[1.0, 1.0])?, 1e-5, 1e-8)?);
        Ok(())
    }

    #[test]
    fn test_scalar_ops() -> crate::Result<()> {
        let a = Var::<f64>::new(&[1.0, 2.0, 3.0])?;

        // c = ((a + 10) * 2 - 1) / 4
        let c = a.add(10.0)?.mul(2.0)?.sub(1.0)?.div(4.0)?;
        let grads = c.backward()?;

        let expected_grad = Tensor::new(&[0.5, 0.5, 0.5])?;
        assert!(grads[&a].allclose(&expected_grad, 1e-5, 1e-8)?);
        Ok(())
    }

    #[test]
    fn test_maximum_minimum() -> crate::Result<()> {
        let a = Var::<f64>::new(&[1.0, 5.0, 3.0])?;
        let b = Var::<f64>::new(&[4.0, 2.0, 3.0])?;

        let grads = a.maximum(&b)?.backward()?;
        // ties split the gradient
        assert!(grads[&a].allclose(&Tensor::new(&[0.0, 1.0, 0.5])?, 1e-5, 1e-8)?);
        assert!(grads[&b].allclose(&Tensor::new(&[1.0, 0.0, 0.5])?, 1e-5, 1e-8)?);

        let x = Var::<f64>::new(&[-2.0, 0.5, 2.0])?;
        let grads = x.clamp(-1.0, 1.0)?.backward()?;
        assert!(grads[&x].allclose(&Tensor::new(&[0.0, 1.0, 0.0])?, 1e-5, 1e-8)?);
        Ok(())
    }

    #[test]
    fn test_unary() -> crate::Result<()> {
        let x = Var::<f64>::new(&[-2.0, -0.5, 0.0, 3.0])?;

        let grads = x.abs()?.backward()?;
        assert!(grads[&x].allclose(&Tensor::new(&[-1.0, -1.0, 1.0, 1.0])?, 1e-5, 1e-8)?);

        let grads = x.relu()?.backward()?;
        assert!(grads[&x].allclose(&Tensor::new(&[0.0, 0.0, 1.0, 1.0])?, 1e-5, 1e-8)?);

        let grads = x.leaky_relu(0.1)?.backward()?;
        assert!(grads[&x].allclose(&Tensor::new(&[0.1, 0.1, 1.0, 1.0])?, 1e-5, 1e-8)?);
        Ok(())
    }

    #[test]
    fn test_if_else_routing() -> crate::Result<()> {
        let a = Var::<f64>::new(&[1.0, 2.0, 3.0])?;
        let b = Var::<f64>::new(&[10.0, 20.0, 30.0])?;
        let mask = Tensor::new(&[true, false, true])?;

        let c = mask.if_else(a.mul(3.0)?, &b)?;
        let grads = c.backward()?;
        assert!(grads[&a].allclose(&Tensor::new(&[3.0, 0.0, 3.0])?, 1e-5, 1e-8)?);
        assert!(grads[&b].allclose(&Tensor::new(&[0.0, 1.0, 0.0])?, 1e-5, 1e-8)?);

        let d = mask.if_else(&a, 0.0)?;
        let grads = d.backward()?;
        assert!(grads[&a].allclose(&Tensor::new(&[1.0, 0.0, 1.0])?, 1e-5, 1e-8)?);
        Ok(())
    }

    #[test]
    fn test_reduce_all() -> crate::Result<()> {
        let a = Var::<f64>::new(&[[1.0, 2.0], [3.0, 4.0]])?;

        let grads = a.mul(&a)?.sum_all()?.backward()?;
        assert!(grads[&a].allclose(&a.mul(2.0)?, 1e-5, 1e-8)?);

        let grads = a.mean_all()?.backward()?;
        assert!(grads[&a].allclose(&Tensor::full((2, 2), 0.25)?, 1e-5, 1e-8)?);
        Ok(())
    }

    #[test]
    fn test_no_grad_guard() -> crate::Result<()> {
        let a = Var::<f64>::new(&[1.0, 2.0])?;
        {
            let _guard = NoGradGuard::new();
            assert!(!is_grad_enabled());
            let b = a.mul(2.0)?;
            assert!(!b.requires_grad());
            assert!(b.op().is_none());
        }
        assert!(is_grad_enabled());
        assert!(a.mul(2.0)?.requires_grad());
        Ok(())
    }

    #[test]
    fn test_detach() -> crate::Result<()> {
        let a = Var::<f64>::new(&[1.0, 2.0])?;
        let b = Var::<f64>::new(&[3.0, 4.0])?;

        let d = a.detach();
        assert!(!d.requires_grad());
        assert!(d.same_storage(&a));

        let c = d.mul(&b)?;
        let grads = c.backward()?;
        assert!(grads.get(&a).is_none());
        assert!(grads[&b].allclose(&a, 1e-5, 1e-8)?);
        Ok(())
    }

    #[test]
    fn test_constant_has_no_graph() -> crate::Result<()> {
        let a = Tensor::<f64>::new(&[1.0, 2.0])?;
        let c = a.mul(2.0)?;
        assert!(c.sorted_nodes().is_empty());
        let grads = c.backward()?;
        assert_eq!(grads.len(), 1);
        Ok(())
    }
}
