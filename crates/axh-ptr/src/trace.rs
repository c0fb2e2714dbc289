//! Destruction tracing on the `Deconst` channel.

#[cfg(feature = "deconst-trace")]
pub(crate) fn freed<T: ?Sized>(handle: &str, address: *const T) {
    use axh_stream::{Channel, ChannelStream, Priority};

    ChannelStream::global().print_info(
        handle,
        &format!("freed {}", ChannelStream::pointer_to_string(address)),
        Priority::DEBUG,
        Channel::Deconst,
    );
}

#[cfg(not(feature = "deconst-trace"))]
#[inline(always)]
pub(crate) fn freed<T: ?Sized>(_handle: &str, _address: *const T) {}
