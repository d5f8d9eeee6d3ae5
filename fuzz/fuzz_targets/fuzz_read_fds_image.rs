#![no_main]

use libfuzzer_sys::fuzz_target;

use fds_image::disk_constants::IMAGE_CAPACITY;
use fds_image::read_fds_image;

fuzz_target!(|data: &[u8]| {
    let mut image = data.to_vec();
    image.resize(IMAGE_CAPACITY, 0);

    let _ = read_fds_image(&image);
});
