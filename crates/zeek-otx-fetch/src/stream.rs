//! Lazy paginated pulse stream.

use futures::stream::{self, Stream, TryStreamExt};
use zeek_otx_types::{OtxError, Pulse, PulsePage};

use crate::{FetchError, OtxClient};

/// Pagination cursor: where the next pull should go.
#[derive(Debug)]
enum Cursor {
    /// No request issued yet; pull the first page.
    Start,
    /// Pull the server-supplied continuation URL.
    Next(String),
    /// The server reported no further pages.
    Done,
}

/// Creates a lazy stream of pulses modified since `modified_since`.
///
/// The stream is single-pass and non-restartable: each pull may perform
/// blocking network I/O, one request per page, yielding every pulse of the
/// current page before the next page is requested. It is finite, ending
/// when a page carries no continuation URL.
///
/// A fetch failure ends the stream with that error; pulses already yielded
/// remain valid.
pub fn pulse_stream<'a>(
    client: &'a OtxClient,
    api_key: &'a str,
    modified_since: &'a str,
) -> impl Stream<Item = Result<Pulse, OtxError>> + 'a {
    pulse_stream_with(move |next| async move {
        client
            .fetch_page(api_key, modified_since, next.as_deref())
            .await
            .map_err(into_otx_error)
    })
}

/// Creates a pulse stream over an arbitrary page source.
///
/// `fetch` is called with `None` for the first page and with the previous
/// page's continuation URL afterwards. This is the seam [`pulse_stream`]
/// plugs the HTTP client into; tests drive it with canned pages.
pub fn pulse_stream_with<F, Fut>(mut fetch: F) -> impl Stream<Item = Result<Pulse, OtxError>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<PulsePage, OtxError>>,
{
    stream::try_unfold(Cursor::Start, move |cursor| {
        let pending = match cursor {
            Cursor::Start => Some(fetch(None)),
            Cursor::Next(url) => Some(fetch(Some(url))),
            Cursor::Done => None,
        };
        async move {
            let Some(pending) = pending else {
                return Ok::<_, OtxError>(None);
            };
            let page = pending.await?;
            let cursor = page
                .next_url()
                .map_or(Cursor::Done, |url| Cursor::Next(url.to_owned()));
            let pulses = stream::iter(page.results.into_iter().map(Ok));
            Ok(Some((pulses, cursor)))
        }
    })
    .try_flatten()
}

/// Maps a page-level fetch error into the crate-wide error taxonomy.
fn into_otx_error(error: FetchError) -> OtxError {
    match error {
        FetchError::Authentication => OtxError::Authentication,
        FetchError::BadRequest => OtxError::BadRequest,
        FetchError::UnexpectedStatus(status) => OtxError::UnexpectedStatus { status },
        FetchError::Http(e) => OtxError::Http(e.to_string()),
    }
}
