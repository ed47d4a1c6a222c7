use super::dop::Dop;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use uom::si::{angle::radian, f64::Angle};

/// Describes the linear polarization of a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StokesVec {
    inner: [f64; 3],
}

impl StokesVec {
    pub fn new(s0: f64, s1: f64, s2: f64) -> Self {
        StokesVec {
            inner: [s0, s1, s2],
        }
    }

    /// Reconstruct a Stokes vector from intensities behind four linear polarizers.
    ///
    /// ```text
    /// S_0 = (I_0 + I_45 + I_90 + I_135) / 2
    /// S_1 = I_0 - I_90
    /// S_2 = I_45 - I_135
    /// ```
    pub fn from_four(i000: f64, i045: f64, i090: f64, i135: f64) -> Self {
        Self::new((i000 + i045 + i090 + i135) / 2., i000 - i090, i045 - i135)
    }

    /// Reconstruct a Stokes vector from intensities behind two orthogonal polarizers.
    ///
    /// Without the diagonal pair S_2 is unknown and taken to be zero.
    pub fn from_two(i000: f64, i090: f64) -> Self {
        Self::new(i000 + i090, i000 - i090, 0.)
    }

    pub fn s0(&self) -> f64 {
        self.inner[0]
    }

    pub fn s1(&self) -> f64 {
        self.inner[1]
    }

    pub fn s2(&self) -> f64 {
        self.inner[2]
    }

    pub fn as_array(&self) -> &[f64; 3] {
        &self.inner
    }

    /// Compute the DoP of the ray.
    ///
    /// `epsilon` keeps the ratio finite when S_0 is zero.
    pub fn dop(&self, epsilon: f64) -> Dop {
        let polarized = (self.s1().powf(2.) + self.s2().powf(2.)).sqrt();
        Dop::saturating(polarized / (self.s0() + epsilon))
    }

    /// Compute the orientation of the polarization ellipse.
    ///
    /// The result is in (-90, 90] degrees.
    pub fn orientation(&self) -> Angle {
        let mut angle = self.s2().atan2(self.s1()) / 2.;

        // atan2 of a negative zero can land exactly on -PI.
        if angle <= -FRAC_PI_2 {
            angle += std::f64::consts::PI;
        }

        Angle::new::<radian>(angle)
    }

    /// Compute the ellipticity of the polarization ellipse.
    ///
    /// Degenerate pixels push the arcsine outside of its domain; those map to zero.
    pub fn ellipticity(&self, dop: Dop, epsilon: f64) -> Angle {
        let ratio = self.s2() / (dop.into_inner() * (self.s0() + epsilon) + epsilon);
        let angle = ratio.asin();
        if angle.is_nan() {
            return Angle::new::<radian>(0.);
        }

        Angle::new::<radian>(angle / 2.)
    }
}

impl From<[f64; 3]> for StokesVec {
    fn from(inner: [f64; 3]) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use quickcheck::quickcheck;
    use rstest::rstest;
    use uom::si::angle::degree;

    const EPS: f64 = 1e-8;

    #[rstest]
    #[case(StokesVec::new(1., 1., 0.), 0.0)]
    #[case(StokesVec::new(1., 0., 1.), 45.0)]
    #[case(StokesVec::new(1., 0., -1.), -45.0)]
    #[case(StokesVec::new(1., -1., 0.), 90.0)]
    #[case(StokesVec::new(1., -1., -0.), 90.0)]
    #[case(StokesVec::new(1., 0., 0.), 0.0)]
    fn orientation(#[case] sv: StokesVec, #[case] expected: f64) {
        assert_relative_eq!(
            sv.orientation().get::<degree>(),
            expected,
            epsilon = 1e-9
        );
    }

    #[rstest]
    #[case(StokesVec::new(1., 0., 5.))]
    #[case(StokesVec::new(0., 0., 1.))]
    #[case(StokesVec::new(-1., 0., 1.))]
    #[case(StokesVec::new(f64::NAN, 0., 1.))]
    fn degenerate_ellipticity(#[case] sv: StokesVec) {
        let dop = sv.dop(EPS);
        assert_eq!(sv.ellipticity(dop, EPS).get::<degree>(), 0.0);
    }

    #[test]
    fn diagonal_ellipticity() {
        let sv = StokesVec::new(2., 1., 1.);
        let dop = sv.dop(EPS);
        assert_relative_eq!(dop.into_inner(), 2f64.sqrt() / 2., epsilon = 1e-8);
        assert_relative_eq!(
            sv.ellipticity(dop, EPS).get::<degree>(),
            22.5,
            epsilon = 1e-6
        );
    }

    #[test]
    fn zero_intensity_dop_is_finite() {
        assert_eq!(StokesVec::new(0., 0., 0.).dop(EPS), Dop::zero());
    }

    #[test]
    fn four_angle_reconstruction() {
        assert_eq!(
            StokesVec::from_four(20., 10., 0., 10.),
            StokesVec::new(20., 20., 0.)
        );
    }

    quickcheck! {
        fn orientation_in_range(s1: f64, s2: f64) -> bool {
            let angle = StokesVec::new(1., s1, s2).orientation().get::<radian>();
            angle.is_nan() || (-FRAC_PI_2 < angle && angle <= FRAC_PI_2)
        }

        fn two_angle_has_no_diagonal(i000: f64, i090: f64) -> bool {
            StokesVec::from_two(i000, i090).s2() == 0.
        }
    }
}
