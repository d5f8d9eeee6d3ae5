#![no_main]

use libfuzzer_sys::fuzz_target;

use fds_image::disk_constants::IMAGE_CAPACITY;
use fds_image::errors::SongCompileError;
use fds_image::{
    build_fds_image, read_fds_image, ExpansionAudio, Machine, Project, Song, SongCompiler,
    TempoMode,
};

use std::collections::HashMap;

struct DummyCompiler;

impl SongCompiler for DummyCompiler {
    fn compile_song(
        &mut self,
        song: &Song,
        _song_data_addr: u16,
        _dpcm_addr: u16,
        _machine: Machine,
    ) -> Result<Vec<u8>, SongCompileError> {
        Ok(vec![0x42; 1000 * (song.id + 1)])
    }
}

fuzz_target!(|data: &[u8]| {
    let project = Project {
        name: "Fuzz".to_owned(),
        author: String::new(),
        tempo_mode: TempoMode::FamiStudio,
        expansion: ExpansionAudio::Fds,
        songs: (0..3)
            .map(|id| Song {
                id,
                name: format!("Song {}", id),
                uses_dpcm: id == 1,
            })
            .collect(),
        dpcm_data: vec![0x55; 300],
    };

    let templates = HashMap::from([(TempoMode::FamiStudio, data.to_vec())]);

    if let Ok(image) =
        build_fds_image(&project, &mut DummyCompiler, &templates, &Default::default())
    {
        assert_eq!(image.data().len(), IMAGE_CAPACITY);
        assert!(read_fds_image(image.data()).is_ok());
    }
});
