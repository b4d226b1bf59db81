use tracing_subscriber::filter::LevelFilter;

pub fn init_subscriber() {
    // Several tests of one binary call this. Only the first installation succeeds.
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}
