namespace! {
    /// Sender address operations
    Senders => "senders" {
        create = Post "senders" as "create";
        remove = Delete "senders" as "remove";
        activate = Post "senders/{{email}}/code" as "activate";
        get_activation_code = Get "senders/{{email}}/code" as "getActivationCode";
        get = Get "senders" as "get";
    }
}
