#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io::{Cursor, Write};
    use std::sync::{Arc, Mutex};

    use image::RgbImage;
    use ndarray::{array, Array2};

    use crate::image_pipeline::common::error::{PipelineError, Result};
    use crate::image_pipeline::interactive::{InputEvent, InteractiveSession, LineInputSource};
    use crate::image_pipeline::normalize::{NormMode, Normalizer};
    use crate::image_pipeline::render::{PngWriter, RasterWriter, RenderConfig};

    struct MockWriter {
        should_fail: bool,
        written_data: Arc<Mutex<Vec<RgbImage>>>,
    }

    impl RasterWriter for MockWriter {
        fn write_raster(&self, raster: &RgbImage, _output: &mut dyn Write, _config: &RenderConfig) -> Result<()> {
            if self.should_fail {
                return Err(PipelineError::EncodeError("Mock encode error".to_string()));
            }
            self.written_data.lock().unwrap().push(raster.clone());
            Ok(())
        }
    }

    fn display() -> Array2<f64> {
        array![[0.0, 1.0, 2.0, 3.0], [4.0, 5.0, 6.0, 7.0], [8.0, 9.0, 10.0, 11.0], [12.0, 13.0, 14.0, 0.0]]
    }

    fn session(
        dir: &tempfile::TempDir,
        should_fail: bool,
    ) -> (InteractiveSession<MockWriter>, Arc<Mutex<Vec<RgbImage>>>) {
        let written = Arc::new(Mutex::new(Vec::new()));
        let writer = MockWriter { should_fail, written_data: written.clone() };
        let norm = Normalizer::new(NormMode::symlog(2.0, 1.0), 28.0, 14.0);
        let session = InteractiveSession::new(
            display(),
            norm,
            writer,
            RenderConfig::default(),
            dir.path().join("output.png"),
        )
        .unwrap();
        (session, written)
    }

    #[test]
    fn test_initial_bounds_clamped_into_sample_range() {
        let dir = tempfile::tempdir().unwrap();
        let (session, _) = session(&dir, false);
        // vmin 28 lies above the data maximum of 14
        assert_eq!(session.clim(), (14.0, 14.0));
    }

    #[test]
    fn test_slider_events_update_normalizer() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, _) = session(&dir, false);

        session.handle(InputEvent::SetVmin(2.0)).unwrap();
        assert_eq!(session.clim(), (2.0, 14.0));

        session.handle(InputEvent::SetVmax(100.0)).unwrap();
        assert_eq!(session.clim(), (2.0, 14.0));

        session.handle(InputEvent::SetVmax(9.0)).unwrap();
        assert_eq!(session.clim(), (2.0, 9.0));
        assert_eq!(session.display(), &display());
    }

    #[test]
    fn test_direct_slider_drag_reaches_normalizer() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, _) = session(&dir, false);

        session.vmin_slider().set_val(-5.0);
        session.vmax_slider().set_val(7.0);

        assert_eq!(session.clim(), (0.0, 7.0));
    }

    #[test]
    fn test_same_bounds_render_identically() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, _) = session(&dir, false);

        session.handle(InputEvent::SetVmin(1.0)).unwrap();
        session.handle(InputEvent::SetVmax(12.0)).unwrap();
        let first = session.render().unwrap();

        session.handle(InputEvent::SetVmin(1.0)).unwrap();
        session.handle(InputEvent::SetVmax(12.0)).unwrap();
        let second = session.render().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_run_processes_events_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, written) = session(&dir, false);

        let mut events = VecDeque::from(vec![
            InputEvent::SetVmin(0.0),
            InputEvent::SetVmax(14.0),
            InputEvent::Save,
            InputEvent::SetVmax(7.0),
            InputEvent::Save,
            InputEvent::Quit,
            InputEvent::SetVmin(5.0),
        ]);

        let summary = session.run(&mut events).unwrap();

        assert_eq!(summary.events, 6);
        assert_eq!(summary.saves, 3);
        assert_eq!(written.lock().unwrap().len(), 3);
        assert_eq!(session.clim(), (0.0, 7.0));
        assert_eq!(events.len(), 1);
        assert!(session.output_path().exists());
    }

    #[test]
    fn test_saved_frames_follow_sliders() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, written) = session(&dir, false);

        let mut source = LineInputSource::new(Cursor::new("vmin 0\nvmax 14\nsave\nvmax 1\nsave\n"));
        session.run(&mut source).unwrap();

        let frames = written.lock().unwrap();
        assert_eq!(frames.len(), 3);
        assert_ne!(frames[1], frames[2]);
    }

    #[test]
    fn test_writer_failure_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, _) = session(&dir, true);

        let mut events = VecDeque::from(vec![InputEvent::Quit]);
        let result = session.run(&mut events);

        assert!(matches!(result, Err(PipelineError::EncodeError(_))));
    }

    #[test]
    fn test_failed_save_leaves_no_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, _) = session(&dir, true);

        let result = session.handle(InputEvent::Save);

        assert!(result.is_err());
        assert!(!session.output_path().exists());
    }

    #[test]
    fn test_title_is_drawn_above_image() {
        let dir = tempfile::tempdir().unwrap();
        let (session, _) = session(&dir, false);
        let untitled = session.render().unwrap();

        let session = session.with_title("SATURN\nJWST NIRCam F323N\nUnknown");
        let titled = session.render().unwrap();

        assert_eq!(session.title(), "SATURN\nJWST NIRCam F323N\nUnknown");
        assert_eq!(titled.width(), untitled.width());
        assert!(titled.height() > untitled.height());
    }

    #[test]
    fn test_save_to_png() {
        let dir = tempfile::tempdir().unwrap();
        let norm = Normalizer::new(NormMode::Linear, 0.0, 14.0);
        let session =
            InteractiveSession::new(display(), norm, PngWriter, RenderConfig::default(), dir.path().join("x.png"))
                .unwrap();

        let mut out = Vec::new();
        session.save_to(&mut out).unwrap();
        assert_eq!(&out[..4], b"\x89PNG");
    }

    #[test]
    fn test_empty_display_rejected() {
        let norm = Normalizer::new(NormMode::Linear, 0.0, 1.0);
        let result = InteractiveSession::new(
            Array2::<f64>::zeros((0, 0)),
            norm,
            PngWriter,
            RenderConfig::default(),
            "unused.png",
        );
        assert!(matches!(result, Err(PipelineError::InvalidDimensions(0, 0))));
    }
}
