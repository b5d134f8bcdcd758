pub fn main() -> iced::Result {
    retinascope::app::run()
}
