//! Timed animation tests under a paused clock.

use draftsmith_core::{Change, ChangeSet};
use draftsmith_diff::{AnimationConfig, AnimationOutcome, Animator};
use futures::StreamExt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_fallback_animation_ends_on_new_text() -> anyhow::Result<()> {
    let animator = Animator::new(AnimationConfig::default());
    let animation = animator.animate("Hello world", "Hello world 🎉", None)?;

    let mut seen = Vec::new();
    let outcome = animation.run(|frame| seen.push(frame.text.clone())).await;

    assert_eq!(outcome, AnimationOutcome::Completed("Hello world 🎉".to_string()));
    assert_eq!(seen, vec!["Hello world ", "Hello world 🎉"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_frames_respect_delays() -> anyhow::Result<()> {
    let config = AnimationConfig::default().with_step_delay_ms(100);
    let animator = Animator::new(config);
    let animation = animator.animate("ab", "", None)?;

    let start = tokio::time::Instant::now();
    let outcome = animation.run(|_| {}).await;

    assert_eq!(outcome, AnimationOutcome::Completed(String::new()));
    assert_eq!(start.elapsed(), Duration::from_millis(200));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_second_edit_cancels_first() -> anyhow::Result<()> {
    let animator = Animator::new(AnimationConfig::default().with_step_delay_ms(10));
    let rendered = Arc::new(Mutex::new(Vec::<(u8, String, bool)>::new()));

    let first = animator.animate("The first draft", "The first draft, revised at length", None)?;
    let log = Arc::clone(&rendered);
    let first_task = tokio::spawn(async move {
        first
            .run(move |f| log.lock().unwrap().push((1, f.text.clone(), f.done)))
            .await
    });

    // Let a few frames of the first animation play.
    tokio::time::sleep(Duration::from_millis(35)).await;

    let second = animator.animate("The first draft", "A second draft", None)?;
    let log = Arc::clone(&rendered);
    let second_outcome = second
        .run(move |f| log.lock().unwrap().push((2, f.text.clone(), f.done)))
        .await;

    assert_eq!(first_task.await?, AnimationOutcome::Cancelled);
    assert_eq!(second_outcome, AnimationOutcome::Completed("A second draft".to_string()));

    let rendered = rendered.lock().unwrap();
    assert!(rendered.iter().any(|(id, _, _)| *id == 1));
    assert!(!rendered.iter().any(|(id, _, done)| *id == 1 && *done));
    let last = rendered.last().map(|(id, text, done)| (*id, text.as_str(), *done));
    assert_eq!(last, Some((2, "A second draft", true)));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_stream_yields_structured_frames() -> anyhow::Result<()> {
    let animator = Animator::new(AnimationConfig::default());
    let changes = ChangeSet::new(vec![
        Change::remove("Hello"),
        Change::add("Hi"),
        Change::keep(" world"),
    ]);
    let animation = animator.animate("Hello world", "Hi world", Some(changes))?;

    let frames: Vec<_> = animation.into_stream().collect().await;

    let texts: Vec<&str> = frames.iter().map(|f| f.text.as_str()).collect();
    assert_eq!(texts, vec![" world", "Hi world"]);
    assert!(frames[1].done);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_stream_ends_without_terminal_frame() -> anyhow::Result<()> {
    let animator = Animator::new(AnimationConfig::default());
    let animation = animator.animate("abc", "xyz", None)?;
    let mut stream = Box::pin(animation.into_stream());

    let first = stream.next().await;
    assert!(first.is_some_and(|f| !f.done));

    animator.cancel();
    assert!(stream.next().await.is_none());
    Ok(())
}

#[tokio::test]
async fn test_invalid_changes_do_not_cancel_current() -> anyhow::Result<()> {
    let animator = Animator::new(AnimationConfig::instant());
    let current = animator.animate("a", "b", None)?;

    let bad = ChangeSet::new(vec![Change::keep("zzz")]);
    assert!(animator.animate("a", "b", Some(bad)).is_err());

    assert!(current.is_current());
    Ok(())
}
