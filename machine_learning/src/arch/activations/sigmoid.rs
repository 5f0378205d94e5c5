/// The logistic activation function.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sigmoid;

impl Sigmoid {
    /// Returns a new `Sigmoid`.
    pub fn new() -> Self {
        Self
    }

    /// Evaluates `1 / (1 + e^-z)`.
    pub fn f(&self, z: f32) -> f32 {
        1. / (1. + (-z).exp())
    }

    /// Evaluates the derivative at a pre-activation value, `s(z) * (1 - s(z))`.
    pub fn df(&self, z: f32) -> f32 {
        let s = self.f(z);
        s * (1. - s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_of_zero_is_one_half() {
        assert_eq!(Sigmoid.f(0.), 0.5);
    }

    #[test]
    fn sigmoid_is_strictly_increasing() {
        let zs: Vec<f32> = (-60..=60).map(|z| z as f32 * 0.1).collect();

        for pair in zs.windows(2) {
            assert!(Sigmoid.f(pair[0]) < Sigmoid.f(pair[1]), "{pair:?}");
        }
    }

    #[test]
    fn sigmoid_stays_inside_the_unit_interval() {
        for z in [-30., -5., -0.1, 0.1, 5., 15.] {
            let s = Sigmoid.f(z);
            assert!(s > 0. && s < 1., "s({z}) = {s}");
        }
    }

    #[test]
    fn derivative_matches_the_closed_form() {
        for z in [-8., -2.5, -1., 0., 0.3, 1., 4., 9.] {
            let s = Sigmoid.f(z);
            assert!((Sigmoid.df(z) - s * (1. - s)).abs() < 1e-7);
        }

        assert_eq!(Sigmoid.df(0.), 0.25);
    }

    #[test]
    fn derivative_matches_finite_differences() {
        let h = 1e-3;

        for z in [-2., -0.5, 0., 0.5, 2.] {
            let numeric = (Sigmoid.f(z + h) - Sigmoid.f(z - h)) / (2. * h);
            assert!((Sigmoid.df(z) - numeric).abs() < 1e-3, "z = {z}");
        }
    }
}
