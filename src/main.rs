use photo_cropper::config::CropperConfig;
use photo_cropper::PhotoCropper;

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = CropperConfig::load();
    log::info!("🎨 Photo cropper starting ({:?})", config.fit_policy);

    iced::application(
        "Photo Cropper",
        PhotoCropper::update,
        PhotoCropper::view,
    )
    .theme(PhotoCropper::theme)
    .centered()
    .run_with(move || PhotoCropper::new(config))
}
