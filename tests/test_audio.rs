use drop_catcher::audio::{AudioSink, BellAudio, Music, Sound};

#[test]
fn bell_rings_once_per_catch() {
    let mut bell = BellAudio::new(false);
    bell.play_once(Sound::Catch);
    bell.play_once(Sound::Catch);
    assert_eq!(bell.take_bells(), 2);
    assert_eq!(bell.take_bells(), 0);
}

#[test]
fn muted_bell_stays_quiet_but_tracks_music() {
    let mut bell = BellAudio::new(true);
    bell.play_looping(Music::Rain);
    bell.play_once(Sound::Catch);

    assert_eq!(bell.take_bells(), 0);
    assert_eq!(bell.music(), Some(Music::Rain));

    bell.stop(Music::Rain);
    assert_eq!(bell.music(), None);
}
