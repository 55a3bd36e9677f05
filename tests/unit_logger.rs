use waifu2x_converter_gui::logger;
use serial_test::serial;
use std::sync::Once;

static INIT: Once = Once::new();

fn ensure_logger_init() {
    INIT.call_once(|| {
        let _ = logger::init_logger();
    });
}

#[test]
#[serial]
fn test_logger_initialization() {
    let result = logger::init_logger();
    assert!(result.is_ok(), "Logger initialization should succeed");
}

#[test]
#[serial]
fn test_logger_multiple_initialization() {
    ensure_logger_init();

    let result1 = logger::init_logger();
    let result2 = logger::init_logger();

    assert!(result1.is_ok(), "First logger init should succeed");
    assert!(result2.is_ok(), "Second logger init should not panic");
}

#[test]
#[serial]
fn test_log_macros_with_formatting() {
    ensure_logger_init();

    let input = "cat.png";
    let pid = 4242;

    waifu2x_converter_gui::logger::log::info!("Converting {}", input);
    waifu2x_converter_gui::logger::log::warn!("Converter {} ignored SIGTERM, killing", pid);
    waifu2x_converter_gui::logger::log::error!("failed to start '{}': {}", "waifu2x-converter-cpp", "not found");
    waifu2x_converter_gui::logger::log::debug!("Arguments: {:?}", ["-j", "4"]);
}
