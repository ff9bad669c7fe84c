use glam::Vec3;

/// Point-to-point measurement tied to a mouse-drag gesture.
///
/// The start point is captured when the gesture begins, the end point follows
/// the cursor, and both are retained after the gesture ends so the last
/// measurement stays reportable until a new one starts. Updates are only
/// applied between `begin` and `end`; a gesture whose press point never hit
/// the plane stays inert and cannot disturb the retained values.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeasurementSession {
    start: Vec3,
    end: Vec3,
    distance: f32,
    has_measurement: bool,
    active: bool,
}

impl MeasurementSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new measurement; both endpoints collapse onto the press point.
    pub fn begin(&mut self, point: Vec3) {
        self.start = point;
        self.end = point;
        self.distance = 0.0;
        self.has_measurement = true;
        self.active = true;
    }

    /// Move the end point and recompute the distance in normalized units.
    /// Ignored unless a gesture is in progress.
    pub fn update(&mut self, point: Vec3) {
        if !self.active {
            return;
        }
        self.end = point;
        self.distance = (self.end - self.start).length();
    }

    /// End the current gesture; the measured values freeze until `begin`.
    pub fn end(&mut self) {
        self.active = false;
    }

    pub fn start_point(&self) -> Vec3 {
        self.start
    }

    pub fn end_point(&self) -> Vec3 {
        self.end
    }

    /// Measured distance in normalized volume-space units.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Measured distance in physical units. One normalized unit corresponds
    /// to the physical image width, since normalization is anchored to the
    /// width axis.
    pub fn physical_distance(&self, image_width: f32) -> f32 {
        self.distance * image_width
    }

    /// True once a measurement has been started, even after the gesture ended.
    pub fn has_measurement(&self) -> bool {
        self.has_measurement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_collapses_both_endpoints() {
        let mut session = MeasurementSession::new();
        session.begin(Vec3::new(0.2, 0.3, 0.4));

        assert_eq!(session.start_point(), session.end_point());
        assert_eq!(session.distance(), 0.0);
        assert!(session.has_measurement());
    }

    #[test]
    fn update_moves_end_point_and_distance() {
        let mut session = MeasurementSession::new();
        session.begin(Vec3::ZERO);
        session.update(Vec3::new(0.3, 0.4, 0.0));

        assert!((session.distance() - 0.5).abs() < 1e-6);
        assert_eq!(session.start_point(), Vec3::ZERO);
    }

    #[test]
    fn physical_distance_scales_by_image_width() {
        let mut session = MeasurementSession::new();
        session.begin(Vec3::ZERO);
        session.update(Vec3::new(0.5, 0.0, 0.0));

        assert!((session.physical_distance(200.0) - 100.0).abs() < 1e-4);
    }

    #[test]
    fn values_retained_until_next_begin() {
        let mut session = MeasurementSession::new();
        session.begin(Vec3::ZERO);
        session.update(Vec3::X);
        session.end();

        assert!((session.distance() - 1.0).abs() < 1e-6);

        session.begin(Vec3::Y);
        assert_eq!(session.distance(), 0.0);
        assert_eq!(session.start_point(), Vec3::Y);
    }

    #[test]
    fn update_before_any_begin_is_ignored() {
        let mut session = MeasurementSession::new();
        session.update(Vec3::X);

        assert!(!session.has_measurement());
        assert_eq!(session.distance(), 0.0);
        assert_eq!(session.end_point(), Vec3::ZERO);
    }

    #[test]
    fn ended_gesture_keeps_values_frozen_through_stray_updates() {
        let mut session = MeasurementSession::new();
        session.begin(Vec3::ZERO);
        session.update(Vec3::new(0.5, 0.0, 0.0));
        session.end();

        // A later gesture whose press point missed the plane never calls
        // begin; cursor hits arriving mid-drag must not touch the retained
        // measurement.
        session.update(Vec3::new(0.4, 0.4, 0.0));
        session.update(Vec3::new(0.9, 0.1, 0.2));

        assert!((session.distance() - 0.5).abs() < 1e-6);
        assert_eq!(session.end_point(), Vec3::new(0.5, 0.0, 0.0));

        session.begin(Vec3::ZERO);
        session.update(Vec3::X);
        assert!((session.distance() - 1.0).abs() < 1e-6);
    }
}
