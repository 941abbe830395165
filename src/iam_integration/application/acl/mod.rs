pub mod cached_iam_authentication_facade_impl;
