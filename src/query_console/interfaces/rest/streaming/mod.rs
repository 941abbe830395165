pub mod websocket_query_stream_sink;
