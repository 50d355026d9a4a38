namespace! {
    /// Suppression list operations
    Blacklist => "blacklist" {
        create = Post "blacklist" as "create";
        remove = Delete "blacklist" as "remove";
        get = Get "blacklist" as "get";
    }
}
