use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::time;

use typist::{CursorConfig, DeleteMode, Sequencer, Status, TimingConfig, Typewriter};

const PHRASES: [&str; 4] = [" Developer", " Engineer", " UI Engineer", " Web Developer"];

fn site_timing() -> TimingConfig {
    TimingConfig {
        type_speed: Duration::from_millis(80),
        delete_speed: Duration::from_millis(40),
        pause_after_type: Duration::from_millis(2500),
        pause_after_delete: Duration::from_millis(500),
        start_delay: Duration::from_millis(800),
        looping: true,
        delete_mode: DeleteMode::Smart,
        jitter: None,
        ..TimingConfig::default()
    }
}

fn hidden_cursor() -> CursorConfig {
    CursorConfig {
        enabled: false,
        ..CursorConfig::default()
    }
}

fn recording_typewriter(timing: TimingConfig) -> (Typewriter, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let sequencer = Sequencer::new(PHRASES, timing).expect("valid sequencer");
    let typewriter = Typewriter::new(
        sequencer,
        move |text: &str| sink.lock().expect("lock").push(text.to_owned()),
        hidden_cursor(),
    );
    (typewriter, seen)
}

#[tokio::test(start_paused = true)]
async fn test_first_phrase_follows_the_schedule() {
    let (typewriter, seen) = recording_typewriter(site_timing());
    typewriter.start().expect("start");

    // Start delay, nothing typed yet
    time::sleep(Duration::from_millis(700)).await;
    assert!(seen.lock().expect("lock").is_empty());

    // 0.8s + 10 characters at 80ms
    time::sleep(Duration::from_millis(1300)).await;
    assert_eq!(typewriter.snapshot(), " Developer");

    // Held for 2.5s, then erased down to the shared leading space
    time::sleep(Duration::from_millis(2600)).await;
    assert_eq!(typewriter.snapshot(), " ");

    time::sleep(Duration::from_millis(1400)).await;
    assert_eq!(typewriter.snapshot(), " Engineer");
    assert!(typewriter.is_playing());
}

#[tokio::test(start_paused = true)]
async fn test_smart_delete_never_goes_below_shared_prefix() {
    let (typewriter, seen) = recording_typewriter(site_timing());
    typewriter.start().expect("start");

    time::sleep(Duration::from_secs(60)).await;
    let seen = seen.lock().expect("lock").clone();
    typewriter.destroy();

    assert!(seen.iter().all(|text| !text.is_empty()));
    assert!(seen.iter().all(|text| text.starts_with(' ')));
    for phrase in PHRASES {
        assert!(
            seen.iter().any(|text| text == phrase),
            "{phrase} was never shown"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn test_pause_resume_keeps_the_text() {
    let (typewriter, _seen) = recording_typewriter(site_timing());
    typewriter.start().expect("start");

    time::sleep(Duration::from_millis(1050)).await;
    typewriter.pause().expect("pause");
    let frozen = typewriter.snapshot();
    assert_eq!(frozen, " De");

    time::sleep(Duration::from_secs(10)).await;
    assert_eq!(typewriter.snapshot(), frozen);
    assert_eq!(typewriter.status(), Status::Paused);

    typewriter.resume().expect("resume");
    time::sleep(Duration::from_secs(1)).await;
    assert_eq!(typewriter.snapshot(), " Developer");
}

#[tokio::test(start_paused = true)]
async fn test_once_stops_on_last_phrase() {
    let timing = TimingConfig {
        looping: false,
        ..site_timing()
    };
    let (typewriter, seen) = recording_typewriter(timing);
    typewriter.start().expect("start");

    time::sleep(Duration::from_secs(60)).await;

    assert_eq!(typewriter.status(), Status::Finished);
    assert_eq!(typewriter.snapshot(), " Web Developer");
    assert_eq!(
        seen.lock().expect("lock").last().map(String::as_str),
        Some(" Web Developer")
    );
    assert_eq!(typewriter.progress(), 1.0);
}

#[tokio::test(start_paused = true)]
async fn test_restart_from_finished() {
    let (typewriter, _seen) = recording_typewriter(TimingConfig {
        looping: false,
        ..site_timing()
    });
    typewriter.start().expect("start");
    time::sleep(Duration::from_secs(60)).await;
    assert_eq!(typewriter.status(), Status::Finished);

    typewriter.restart().expect("restart");
    assert_eq!(typewriter.snapshot(), "");
    assert_eq!(typewriter.status(), Status::Running);

    time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(typewriter.snapshot(), " Developer");
}
