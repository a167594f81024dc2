pub mod track_extractor;
