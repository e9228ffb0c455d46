use eframe::egui;
use imageslider::app::loader::{LoadPhase, Loader, LOADING_STATUS, READY_STATUS};
use std::time::Duration;
use std::{fs, thread};
use tempfile::tempdir;

mod common;
use common::{solid_image, write_image};

fn viewport() -> egui::Vec2 {
    egui::vec2(640.0, 400.0)
}

fn wait_for_terminal_phase(loader: &mut Loader) {
    for _ in 0..200 {
        loader.poll();
        if !matches!(loader.phase(), LoadPhase::Loading) {
            return;
        }
        thread::sleep(Duration::from_millis(25));
    }
    panic!("loader never left the loading phase");
}

#[test]
fn loader_emits_complete_ordered_set() {
    let tmp = tempdir().unwrap();
    let sizes = [(800, 1000), (320, 200), (640, 400)];
    let mut sources = Vec::new();
    for (idx, (w, h)) in sizes.iter().enumerate() {
        let path = tmp.path().join(format!("{idx}.png"));
        write_image(&path, &solid_image(*w, *h, [10 * idx as u8, 0, 0, 255]));
        sources.push(path);
    }

    let mut loader = Loader::new(&sources, viewport(), Duration::from_secs(10));
    assert_eq!(loader.status_line(), LOADING_STATUS);
    wait_for_terminal_phase(&mut loader);

    assert!(matches!(loader.phase(), LoadPhase::Ready));
    assert_eq!(loader.status_line(), READY_STATUS);

    let slides = loader.take_slides().expect("slides");
    assert_eq!(slides.len(), 3);
    for (idx, slide) in slides.iter().enumerate() {
        assert_eq!(slide.index, idx);
        assert!(slide.display_size.x <= 640.0);
        assert!(slide.display_size.y <= 400.0);
    }
    // Scaled both down and up to fit, aspect ratio intact.
    assert_eq!(slides[0].display_size, egui::vec2(320.0, 400.0));
    assert_eq!(slides[0].pixels.size, [320, 400]);
    assert_eq!(slides[1].display_size, egui::vec2(640.0, 400.0));
    assert_eq!(slides[2].natural_size, egui::vec2(640.0, 400.0));

    // The set is handed out exactly once.
    assert!(loader.take_slides().is_none());
}

#[test]
fn slides_are_withheld_until_every_source_finishes() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("only.png");
    write_image(&path, &solid_image(16, 16, [1, 2, 3, 255]));

    let mut loader = Loader::new(&[path], viewport(), Duration::from_secs(10));
    assert!(matches!(loader.phase(), LoadPhase::Loading));
    assert!(loader.take_slides().is_none());
}

#[test]
fn one_bad_source_fails_the_whole_load() {
    let tmp = tempdir().unwrap();
    let good = tmp.path().join("good.png");
    write_image(&good, &solid_image(8, 8, [1, 2, 3, 255]));
    let bad = tmp.path().join("corrupt.png");
    fs::write(&bad, b"not an image").unwrap();

    let mut loader = Loader::new(&[good, bad], viewport(), Duration::from_secs(10));
    wait_for_terminal_phase(&mut loader);

    let LoadPhase::Failed(message) = loader.phase() else {
        panic!("expected the load to fail");
    };
    assert!(message.contains("corrupt.png"));
    assert_eq!(loader.status_line(), message);
    assert!(loader.take_slides().is_none());
}

#[test]
fn load_fails_when_deadline_passes() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("slow.png");
    write_image(&path, &solid_image(512, 512, [7, 7, 7, 255]));

    let mut loader = Loader::new(&[path], viewport(), Duration::ZERO);
    loader.poll();

    let LoadPhase::Failed(message) = loader.phase() else {
        panic!("expected the load to time out");
    };
    assert!(message.contains("Timed out"));
}
