mod fakes;

pub use fakes::FakeSessionLookupRepository;
