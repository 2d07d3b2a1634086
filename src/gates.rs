use nalgebra::Matrix2;
use nalgebra_sparse::convert::serial::convert_dense_coo;
use nalgebra_sparse::{coo::CooMatrix, csr::CsrMatrix};
use num_complex::Complex;

use crate::Qbit;

pub fn h_matrix() -> CsrMatrix<Qbit> {
    let root2 = 2.0_f64.sqrt();
    let one = Complex::new(1.0, 0.0);
    let hadamard_coo = convert_dense_coo(&Matrix2::from_row_slice(&[
        one / root2,
        one / root2,
        one / root2,
        -one / root2,
    ]));
    CsrMatrix::from(&hadamard_coo)
}

pub fn x_matrix() -> CsrMatrix<Qbit> {
    let mut x_coo = CooMatrix::new(2, 2);
    x_coo.push(0, 1, Complex::new(1.0, 0.0));
    x_coo.push(1, 0, Complex::new(1.0, 0.0));
    CsrMatrix::from(&x_coo)
}

pub fn z_matrix() -> CsrMatrix<Qbit> {
    let mut z_coo = CooMatrix::new(2, 2);
    z_coo.push(0, 0, Complex::new(1.0, 0.0));
    z_coo.push(1, 1, Complex::new(-1.0, 0.0));
    CsrMatrix::from(&z_coo)
}

/// |1><1|, the projector a control qubit contributes when it is set.
pub fn one_projector() -> CsrMatrix<Qbit> {
    let mut one_one = CooMatrix::new(2, 2);
    one_one.push(1, 1, Complex::new(1.0, 0.0));
    CsrMatrix::from(&one_one)
}

#[cfg(test)]
mod tests {
    use nalgebra_sparse::convert::serial::convert_csr_dense;

    use super::*;
    use crate::assert_approx_complex_eq;

    #[test]
    fn test_hadamard_is_self_inverse() {
        let h = h_matrix();
        let hh = convert_csr_dense(&(&h * &h));

        assert_approx_complex_eq!(1.0, 0.0, hh[(0, 0)]);
        assert_approx_complex_eq!(0.0, 0.0, hh[(0, 1)]);
        assert_approx_complex_eq!(0.0, 0.0, hh[(1, 0)]);
        assert_approx_complex_eq!(1.0, 0.0, hh[(1, 1)]);
    }

    #[test]
    fn test_hzh_is_x() {
        let hzh = convert_csr_dense(&(&(&h_matrix() * &z_matrix()) * &h_matrix()));
        let x = convert_csr_dense(&x_matrix());

        for (actual, expected) in hzh.iter().zip(x.iter()) {
            assert_approx_complex_eq!(expected.re, expected.im, *actual);
        }
    }
}
