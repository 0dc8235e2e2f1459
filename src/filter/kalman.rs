use super::Observation;
use crate::config::app::Parameters;
use crate::error::Error;

pub struct Kalman {
    a: f64,
    b: f64,
    c: f64,
    r: f64,
    observation: Observation,
    xk: f64,
    x: f64,
    pk: f64,
    last_real: f64,
    last_pred: f64,
}

impl Kalman {
    /// Seeds the state from `x0` when it is defined, otherwise from the first measurement.
    pub fn initialize(parameters: &Parameters, first: Option<f64>) -> Result<Kalman, Error> {
        let xk = match (parameters.x0, first) {
            (Some(x0), _) => x0,
            (None, Some(z0)) => z0,
            (None, None) => {
                return Err(Error::config(
                    "x0 is not defined and there is no first measurement to start from",
                ))
            }
        };

        Ok(Kalman {
            a: parameters.a,
            b: parameters.b,
            c: parameters.c,
            r: parameters.r,
            observation: parameters.observation,
            xk,
            x: xk,
            pk: parameters.p0,
            last_real: xk,
            last_pred: xk,
        })
    }

    /// Consumes one measurement, returns the posterior estimate and whether the estimate
    /// moved in the same direction as the measurement.
    pub fn step(&mut self, z: f64) -> (f64, bool) {
        // predict
        self.xk = self.a * self.xk + self.b * z;
        self.pk = self.a * self.pk * self.a;
        self.x = self.a * self.x + self.b * z;

        let zk = match self.observation {
            Observation::Synthesized => self.c * self.x,
            Observation::Measured => z,
        };

        // update
        let gk = if self.pk == 0.0 {
            1.0
        } else {
            self.pk * self.c / (self.c * self.pk * self.c + self.r)
        };
        self.xk += gk * (zk - self.c * self.xk);
        self.pk = (1.0 - gk * self.c) * self.pk;

        log::trace!("z = {}, zk = {}, gk = {}, xk = {}", z, zk, gk, self.xk);

        // NaN compares false on both sides, which counts as a match
        let real_up = z > self.last_real;
        let pred_up = self.xk > self.last_pred;

        self.last_real = z;
        self.last_pred = self.xk;

        (self.xk, real_up == pred_up)
    }

    pub fn estimate(&self) -> f64 {
        self.xk
    }

    pub fn covariance(&self) -> f64 {
        self.pk
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters(a: f64, b: f64, c: f64, r: f64, p0: f64, x0: Option<f64>) -> Parameters {
        Parameters {
            a,
            b,
            c,
            r,
            p0,
            x0,
            observation: Observation::Synthesized,
        }
    }

    fn run(kalman: &mut Kalman, zs: &[f64]) -> (Vec<f64>, Vec<bool>) {
        zs.iter().map(|&z| kalman.step(z)).unzip()
    }

    fn assert_close(expected: f64, actual: f64) {
        let tolerance = 1e-12 * expected.abs().max(f64::MIN_POSITIVE);
        assert!(
            (expected - actual).abs() <= tolerance,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_initialize_from_first_measurement() -> Result<(), Error> {
        let kalman = Kalman::initialize(&parameters(0.8, 0.2, 1.0, 1.0, 2.5, None), Some(4.0))?;

        assert_eq!(4.0, kalman.xk);
        assert_eq!(4.0, kalman.x);
        assert_eq!(2.5, kalman.pk);
        assert_eq!(4.0, kalman.last_real);
        assert_eq!(4.0, kalman.last_pred);

        Ok(())
    }

    #[test]
    fn test_initialize_prefers_x0_over_first_measurement() -> Result<(), Error> {
        let kalman = Kalman::initialize(&parameters(0.8, 0.2, 1.0, 1.0, 1.0, Some(-3.0)), Some(4.0))?;

        assert_eq!(-3.0, kalman.estimate());
        assert_eq!(-3.0, kalman.last_real);

        Ok(())
    }

    #[test]
    fn test_initialize_without_any_start_value() {
        let result = Kalman::initialize(&parameters(0.8, 0.2, 1.0, 1.0, 1.0, None), None);

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_constant_signal_stays_constant() -> Result<(), Error> {
        let mut kalman = Kalman::initialize(&parameters(0.8, 0.2, 1.0, 1.0, 1.0, None), Some(5.0))?;

        let (estimates, matches) = run(&mut kalman, &[5.0; 5]);

        assert_eq!(vec![5.0; 5], estimates);
        assert_eq!(vec![true; 5], matches);

        Ok(())
    }

    #[test]
    fn test_step_response() -> Result<(), Error> {
        let mut kalman =
            Kalman::initialize(&parameters(0.8, 0.2, 1.0, 1.0, 1.0, Some(0.0)), None)?;

        let (estimate, matched) = kalman.step(1.0);

        assert_close(0.2, kalman.x);
        assert_close(0.2, estimate);
        assert!(matched);
        // 0.64 - 0.64 * 0.64 / 1.64
        assert_close(0.64 / 1.64, kalman.covariance());

        Ok(())
    }

    #[test]
    fn test_direction_statistic() -> Result<(), Error> {
        let mut kalman =
            Kalman::initialize(&parameters(0.5, 0.5, 1.0, 1.0, 1.0, Some(0.0)), None)?;

        let (estimates, matches) = run(&mut kalman, &[1.0, 2.0, 1.0]);

        assert_close(0.5, estimates[0]);
        assert_close(1.25, estimates[1]);
        assert_close(1.125, estimates[2]);
        assert_eq!(vec![true, true, true], matches);

        Ok(())
    }

    #[test]
    fn test_direction_mismatch() -> Result<(), Error> {
        // estimate rises towards the measurement while the measurement itself drops
        let mut kalman =
            Kalman::initialize(&parameters(0.5, 0.5, 1.0, 1.0, 1.0, Some(0.0)), None)?;

        let (_, matches) = run(&mut kalman, &[10.0, 8.0]);

        assert_eq!(vec![true, false], matches);

        Ok(())
    }

    #[test]
    fn test_zero_variance_start_uses_unit_gain() -> Result<(), Error> {
        let mut kalman = Kalman::initialize(&parameters(1.0, 0.0, 1.0, 0.0, 0.0, Some(7.0)), None)?;

        let (estimates, matches) = run(&mut kalman, &[42.0, 42.0]);

        assert_eq!(vec![7.0, 7.0], estimates);
        // the measurement jumps from 7 to 42 while the estimate stays flat
        assert_eq!(vec![false, true], matches);
        assert_eq!(0.0, kalman.covariance());

        Ok(())
    }

    #[test]
    fn test_collapsed_covariance_assigns_observation() -> Result<(), Error> {
        let mut kalman =
            Kalman::initialize(&parameters(0.5, 0.5, 1.0, 1.0, 1.0, Some(1.0)), None)?;
        kalman.pk = 0.0;
        kalman.x = 3.0;

        let (estimate, _) = kalman.step(5.0);

        // x = 0.5 * 3 + 0.5 * 5, while the prediction of xk alone would be 3
        assert_eq!(4.0, kalman.x);
        assert_eq!(kalman.c * kalman.x, estimate);
        assert_eq!(0.0, kalman.covariance());

        Ok(())
    }

    #[test]
    fn test_covariance_stays_non_negative() -> Result<(), Error> {
        let mut kalman =
            Kalman::initialize(&parameters(0.9, 0.1, 1.3, 0.25, 4.0, Some(0.0)), None)?;

        for i in 0..500 {
            let previous = kalman.covariance();
            kalman.step((i as f64 * 0.37).sin() * 10.0);
            assert!(kalman.covariance() >= -4.0 * f64::EPSILON * previous.abs());
        }

        Ok(())
    }

    #[test]
    fn test_nan_measurement_propagates_and_matches() -> Result<(), Error> {
        let mut kalman = Kalman::initialize(&parameters(0.8, 0.2, 1.0, 1.0, 1.0, None), Some(1.0))?;

        let (estimate, matched) = kalman.step(f64::NAN);

        assert!(estimate.is_nan());
        assert!(matched);

        let (estimate, matched) = kalman.step(2.0);

        assert!(estimate.is_nan());
        assert!(matched);

        Ok(())
    }

    #[test]
    fn test_measured_observation_is_textbook_filter() -> Result<(), Error> {
        let mut parameters = parameters(1.0, 0.0, 1.0, 1.0, 1.0, Some(0.0));
        parameters.observation = Observation::Measured;
        let mut kalman = Kalman::initialize(&parameters, None)?;

        let (estimate, _) = kalman.step(10.0);

        // gain 1 / (1 + 1) halfway towards the measurement
        assert_eq!(5.0, estimate);
        assert_eq!(0.5, kalman.covariance());

        let (estimate, _) = kalman.step(10.0);

        // gain 0.5 / 1.5
        assert_close(5.0 + (10.0 - 5.0) / 3.0, estimate);

        Ok(())
    }
}
