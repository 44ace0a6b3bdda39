fn main() {
    // ESP-IDF link arguments are only needed for the firmware image.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
