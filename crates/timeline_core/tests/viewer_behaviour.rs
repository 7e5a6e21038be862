use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use timeline_core::{FileViewer, MediaFile};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(viewer_logging::initialize_for_tests);
}

fn media_file(file_name: &str) -> MediaFile {
    MediaFile {
        file_name: file_name.to_string(),
        description: "Viaduct Harbour in Auckland".to_string(),
    }
}

#[test]
fn starts_with_an_empty_slot() {
    init_logging();
    let viewer = FileViewer::new();
    assert_eq!(viewer.current(), None);
}

#[test]
fn show_sets_the_slot_and_notifies_subscribers() {
    init_logging();
    let mut viewer = FileViewer::new();
    let shown = Rc::new(RefCell::new(Vec::new()));

    let sink = shown.clone();
    viewer
        .file_set
        .subscribe(move |file| sink.borrow_mut().push(file.clone()));

    let file = media_file("2018-08-04--09-51-12---e2742f1b44d5060149ef50c3ab44a3b1028bdd7a.jpg");
    viewer.show(file.clone());

    assert_eq!(viewer.current(), Some(&file));
    assert_eq!(*shown.borrow(), vec![file]);
}

#[test]
fn last_write_wins() {
    init_logging();
    let mut viewer = FileViewer::new();

    let first = media_file("2018-08-04--09-51-12---e2742f1b44d5060149ef50c3ab44a3b1028bdd7a.jpg");
    let second = media_file("2018-08-04--09-51-33---2c31731560120319f9f7afbb6bbf4767100bac7a.jpg");
    viewer.show(first);
    viewer.show(second.clone());

    assert_eq!(viewer.current(), Some(&second));
}
